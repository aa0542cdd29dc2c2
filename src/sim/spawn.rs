//! Spawning and the difficulty curve
//!
//! Asteroid pressure ramps continuously with effective elapsed time; large
//! asteroids unlock by stage. Power-ups arrive on a slow random cadence.

use rand::Rng;

use super::state::{Asteroid, GameState, PowerUp, PowerUpKind, Ship};
use crate::consts::*;
use crate::tuning::Tuning;

/// Asteroid spawn delay (ms) after `t` effective seconds of play
///
/// Starts at base + range and decays exponentially toward the base, never
/// below the floor.
pub fn asteroid_delay(t: f64, tuning: &Tuning) -> f64 {
    let decayed = tuning.asteroid_delay_range_ms * (-t / tuning.asteroid_delay_decay_secs).exp();
    (tuning.asteroid_delay_base_ms + decayed).max(tuning.asteroid_delay_floor_ms)
}

/// 1-based difficulty stage
pub fn stage(t: f64, tuning: &Tuning) -> u32 {
    (t.max(0.0) / tuning.stage_secs).floor() as u32 + 1
}

/// Probability that a spawn at `stage` is a large asteroid
pub fn large_asteroid_chance(stage: u32, tuning: &Tuning) -> f64 {
    if stage < tuning.large_asteroid_min_stage {
        return 0.0;
    }
    let idx = (stage - tuning.large_asteroid_min_stage) as usize;
    let last = tuning.large_asteroid_chances.len().saturating_sub(1);
    tuning
        .large_asteroid_chances
        .get(idx.min(last))
        .copied()
        .unwrap_or(0.0)
}

/// Spawn one asteroid off the right edge. Skipped at the live cap.
///
/// Returns true if an asteroid was added.
pub fn spawn_asteroid(state: &mut GameState, t: f64, tuning: &Tuning, rng: &mut impl Rng) -> bool {
    if state.game_over || state.asteroids.len() >= tuning.max_asteroids {
        return false;
    }

    let chance = large_asteroid_chance(stage(t, tuning), tuning);
    let large = chance > 0.0 && rng.random::<f64>() < chance;
    let size = if large {
        LARGE_ASTEROID_SIZE
    } else {
        SMALL_ASTEROID_SIZE
    };

    let x = GAME_WIDTH + ASTEROID_SPAWN_OFFSET;
    let y = TOP_BOUNDARY + rng.random::<f32>() * (GAME_HEIGHT - TOP_BOUNDARY - size);

    let asteroid = if large {
        Asteroid::large(x, y)
    } else {
        let variant = if rng.random_bool(0.5) { 0 } else { 1 };
        Asteroid::small(x, y, variant)
    };
    log::debug!(
        "Spawned {} asteroid at y={:.0} (t={:.1}s, {} live)",
        if large { "large" } else { "small" },
        y,
        t,
        state.asteroids.len() + 1
    );
    state.asteroids.push(asteroid);
    true
}

/// Random power-up delay (ms) in [min, max)
pub fn power_up_delay(tuning: &Tuning, rng: &mut impl Rng) -> f64 {
    rng.random_range(tuning.power_up_delay_min_ms..tuning.power_up_delay_max_ms)
}

/// Pick the type to spawn given the nominal alternation slot
///
/// A capped stat yields to the other type. With both capped the nominal
/// type spawns anyway and collecting it changes nothing.
pub fn choose_power_up(ship: &Ship, nominal: PowerUpKind) -> PowerUpKind {
    if ship.is_capped(nominal) && !ship.is_capped(nominal.other()) {
        nominal.other()
    } else {
        nominal
    }
}

/// Spawn a power-up unless an uncollected one is still on screen
///
/// Returns the spawned type. Alternation only advances on success.
pub fn spawn_power_up(state: &mut GameState, rng: &mut impl Rng) -> Option<PowerUpKind> {
    if state.game_over || state.has_uncollected_power_up() {
        return None;
    }

    let kind = choose_power_up(&state.ship, state.next_power_up);
    let x = GAME_WIDTH + POWER_UP_SPAWN_OFFSET;
    let y = TOP_BOUNDARY + rng.random::<f32>() * (GAME_HEIGHT - TOP_BOUNDARY - POWER_UP_SIZE);
    state.power_ups.push(PowerUp::new(kind, x, y));
    state.next_power_up = kind.other();
    log::debug!("Spawned {:?} power-up at y={:.0}", kind, y);
    Some(kind)
}
