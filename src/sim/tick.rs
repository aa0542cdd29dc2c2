//! Fixed timestep simulation tick
//!
//! Advances the world by one step. Ordering inside a tick matters: movement,
//! then collisions, then animation stepping, then pruning.

use super::collision::overlaps;
use super::state::{GameEvent, GameState};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move up held
    pub move_up: bool,
    /// Move down held
    pub move_down: bool,
    /// Continuous fire held
    pub firing: bool,
    /// Single shot request (tap), still subject to the cooldown
    pub fire_pulse: bool,
}

/// Advance the game state by one fixed timestep
///
/// `now` is the host timestamp in milliseconds, used for fire cadence.
pub fn tick(state: &mut GameState, input: &TickInput, now: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Ship destruction sequence freezes the world
    if state.exploding {
        advance_explosion(state, &mut events);
        return events;
    }
    if state.game_over {
        return events;
    }

    state.time_ticks += 1;

    state.scroll_x -= SCROLL_SPEED;
    if state.scroll_x <= -GAME_WIDTH {
        state.scroll_x = 0.0;
    }

    // Ship movement
    let ship = &mut state.ship;
    ship.moving_up = input.move_up;
    ship.moving_down = input.move_down;
    ship.firing = input.firing;
    ship.apply_movement();

    // Fire
    if ship.firing || input.fire_pulse {
        if let Some(bullet) = ship.try_fire(now) {
            state.bullets.push(bullet);
            events.push(GameEvent::BulletFired);
        }
    }

    for bullet in state.bullets.iter_mut() {
        bullet.pos.x += bullet.speed;
    }
    state.bullets.retain(|b| b.pos.x < GAME_WIDTH);

    for power_up in state.power_ups.iter_mut().filter(|p| !p.collected) {
        power_up.pos += power_up.vel;
    }
    state.power_ups.retain(|p| !p.collected && !p.is_off_screen());

    // Asteroids: move, resolve hits, step debris animation
    let ship_rect = state.ship.rect();
    let mut ship_killed = false;
    for asteroid in state.asteroids.iter_mut() {
        if !asteroid.destroyed {
            asteroid.pos.x -= asteroid.speed;
            let rect = asteroid.rect();

            // At most one bullet resolves against an asteroid per tick
            if let Some(idx) = state
                .bullets
                .iter()
                .position(|b| overlaps(&rect, &b.rect()))
            {
                state.bullets.remove(idx);
                if asteroid.absorb_hit() {
                    let score = asteroid.score();
                    state.score += score;
                    events.push(GameEvent::AsteroidDestroyed {
                        large: asteroid.large,
                        score,
                    });
                } else {
                    events.push(GameEvent::AsteroidHit);
                }
            }

            if !asteroid.destroyed && overlaps(&rect, &ship_rect) {
                asteroid.destroy();
                let died = state.ship.take_damage(asteroid.damage);
                events.push(GameEvent::ShipHit {
                    damage: asteroid.damage,
                    health: state.ship.health,
                });
                ship_killed |= died;
            }
        }

        if asteroid.destroyed {
            asteroid.animation.tick();
        }
    }

    state.asteroids.retain(|a| !a.is_removable());

    // A dying ship collects nothing this tick
    if ship_killed && state.trigger_explosion() {
        log::info!("Ship destroyed (score {})", state.score);
        events.push(GameEvent::ShipDestroyed);
        return events;
    }

    // Power-up pickup
    let ship_rect = state.ship.rect();
    for power_up in state.power_ups.iter_mut().filter(|p| !p.collected) {
        if overlaps(&power_up.rect(), &ship_rect) {
            state.ship.apply_power_up(power_up.kind, now);
            power_up.collected = true;
            events.push(GameEvent::PowerUpCollected(power_up.kind));
        }
    }

    events
}

fn advance_explosion(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.ship.explosion.tick();
    if state.ship.explosion.is_finished() {
        state.exploding = false;
        state.explosion_done = true;
        events.push(GameEvent::ExplosionFinished);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Asteroid, Bullet, PowerUp, PowerUpKind};
    use glam::Vec2;
    use proptest::prelude::*;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn idle() -> TickInput {
        TickInput::default()
    }

    /// Asteroid placed right on top of the ship
    fn asteroid_on_ship(state: &GameState, large: bool) -> Asteroid {
        let pos = state.ship.pos;
        if large {
            Asteroid::large(pos.x + 4.0, pos.y - 4.0)
        } else {
            Asteroid::small(pos.x + 4.0, pos.y, 0)
        }
    }

    /// Bullet sitting inside the asteroid's current rect
    fn bullet_inside(asteroid: &Asteroid) -> Bullet {
        Bullet {
            pos: asteroid.pos + Vec2::new(10.0, 20.0),
            size: Vec2::new(BULLET_WIDTH, BULLET_HEIGHT),
            speed: BULLET_SPEED,
        }
    }

    #[test]
    fn test_small_hit_reduces_health() {
        let mut state = GameState::new();
        assert_eq!(state.ship.health, 2);
        let asteroid = asteroid_on_ship(&state, false);
        state.asteroids.push(asteroid);

        let events = tick(&mut state, &idle(), 0.0);

        assert_eq!(state.ship.health, 1);
        assert!(!state.exploding);
        assert!(!state.game_over);
        assert!(events.contains(&GameEvent::ShipHit { damage: 1, health: 1 }));
        assert!(!events.contains(&GameEvent::ShipDestroyed));
    }

    #[test]
    fn test_large_hit_on_last_health_explodes() {
        let mut state = GameState::new();
        state.ship.health = 1;
        let asteroid = asteroid_on_ship(&state, true);
        state.asteroids.push(asteroid);

        let input = TickInput {
            firing: true,
            ..Default::default()
        };
        let events = tick(&mut state, &input, 0.0);

        assert_eq!(state.ship.health, 0);
        assert!(state.exploding);
        assert!(state.game_over);
        assert!(!state.ship.firing);
        assert!(events.contains(&GameEvent::ShipDestroyed));
    }

    #[test]
    fn test_power_up_not_collected_on_death_tick() {
        let mut state = GameState::new();
        state.ship.health = 1;
        let pos = state.ship.pos;
        let asteroid = asteroid_on_ship(&state, true);
        state.asteroids.push(asteroid);
        state
            .power_ups
            .push(PowerUp::new(PowerUpKind::Health, pos.x, pos.y));

        let events = tick(&mut state, &idle(), 0.0);

        assert_eq!(state.ship.health, 0);
        assert!(events.contains(&GameEvent::ShipDestroyed));
        assert!(!state.power_ups[0].collected);
        assert!(
            !events
                .iter()
                .any(|e| matches!(e, GameEvent::PowerUpCollected(_)))
        );
    }

    #[test]
    fn test_large_asteroid_needs_three_hits() {
        let mut state = GameState::new();
        state.asteroids.push(Asteroid::large(400.0, 100.0));

        for hit in 1..=3 {
            let bullet = bullet_inside(&state.asteroids[0]);
            state.bullets.push(bullet);
            let events = tick(&mut state, &idle(), hit as f64 * FRAME_MS);
            if hit < 3 {
                assert!(!state.asteroids[0].destroyed);
                assert_eq!(state.asteroids[0].hit_count, 3 - hit);
                assert_eq!(state.score, 0);
                assert_eq!(events, vec![GameEvent::AsteroidHit]);
            } else {
                assert!(state.asteroids[0].destroyed);
                assert_eq!(state.score, 30);
            }
            assert!(state.bullets.is_empty());
        }

        // Debris no longer absorbs bullets or scores
        let bullet = bullet_inside(&state.asteroids[0]);
        state.bullets.push(bullet);
        tick(&mut state, &idle(), 4.0 * FRAME_MS);
        assert_eq!(state.score, 30);
        assert_eq!(state.bullets.len(), 1);
    }

    #[test]
    fn test_one_bullet_per_asteroid_per_tick() {
        let mut state = GameState::new();
        state.asteroids.push(Asteroid::large(400.0, 100.0));
        let bullet = bullet_inside(&state.asteroids[0]);
        state.bullets.push(bullet.clone());
        state.bullets.push(bullet);

        tick(&mut state, &idle(), 0.0);

        assert_eq!(state.asteroids[0].hit_count, 2);
        assert_eq!(state.bullets.len(), 1);
    }

    #[test]
    fn test_destroyed_asteroid_freezes_then_prunes() {
        let mut state = GameState::new();
        state.asteroids.push(Asteroid::small(300.0, 100.0, 1));
        let bullet = bullet_inside(&state.asteroids[0]);
        state.bullets.push(bullet);
        tick(&mut state, &idle(), 0.0);
        assert!(state.asteroids[0].destroyed);
        let frozen_x = state.asteroids[0].pos.x;

        let mut ticks = 1;
        while !state.asteroids.is_empty() {
            assert_eq!(state.asteroids[0].pos.x, frozen_x);
            tick(&mut state, &idle(), 0.0);
            ticks += 1;
            assert!(ticks <= 60, "debris never removed");
        }
        assert_eq!(ticks, (SMALL_DESTROY_FRAMES as u32 * ASTEROID_TICKS_PER_FRAME) as usize);
    }

    #[test]
    fn test_off_screen_asteroid_pruned() {
        let mut state = GameState::new();
        state.asteroids.push(Asteroid::small(-SMALL_ASTEROID_SIZE + 1.0, 100.0, 0));
        tick(&mut state, &idle(), 0.0);
        assert!(state.asteroids.is_empty());
    }

    #[test]
    fn test_held_fire_respects_cadence() {
        let mut state = GameState::new();
        let input = TickInput {
            firing: true,
            ..Default::default()
        };
        let mut fired = 0;
        // One second of frames at 3 shots/s
        for frame in 0..60 {
            let events = tick(&mut state, &input, frame as f64 * FRAME_MS);
            fired += events.iter().filter(|e| **e == GameEvent::BulletFired).count();
        }
        assert_eq!(fired, START_FIRE_RATE as usize);
    }

    #[test]
    fn test_bullets_leave_right_edge() {
        let mut state = GameState::new();
        state.bullets.push(Bullet {
            pos: Vec2::new(GAME_WIDTH - 2.0, 100.0),
            size: Vec2::new(BULLET_WIDTH, BULLET_HEIGHT),
            speed: BULLET_SPEED,
        });
        tick(&mut state, &idle(), 0.0);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_capped_fire_rate_power_up_still_collected() {
        let mut state = GameState::new();
        state.ship.fire_rate = FIRE_RATE_CAP;
        let pos = state.ship.pos;
        state
            .power_ups
            .push(PowerUp::new(PowerUpKind::FireRate, pos.x + 4.0, pos.y + 4.0));

        let events = tick(&mut state, &idle(), 0.0);

        assert_eq!(state.ship.fire_rate, FIRE_RATE_CAP);
        assert!(state.power_ups[0].collected);
        assert!(events.contains(&GameEvent::PowerUpCollected(PowerUpKind::FireRate)));

        // Collected power-ups are pruned next tick
        tick(&mut state, &idle(), FRAME_MS);
        assert!(state.power_ups.is_empty());
    }

    #[test]
    fn test_health_power_up() {
        let mut state = GameState::new();
        let pos = state.ship.pos;
        state
            .power_ups
            .push(PowerUp::new(PowerUpKind::Health, pos.x, pos.y));
        tick(&mut state, &idle(), 0.0);
        assert_eq!(state.ship.health, START_HEALTH + 1);
    }

    #[test]
    fn test_explosion_runs_to_completion() {
        let mut state = GameState::new();
        state.trigger_explosion();
        let asteroid = Asteroid::small(300.0, 100.0, 0);
        state.asteroids.push(asteroid);

        let total = EXPLOSION_FRAMES as u32 * EXPLOSION_TICKS_PER_FRAME;
        for i in 1..total {
            let events = tick(&mut state, &idle(), 0.0);
            assert!(events.is_empty(), "finished early at tick {}", i);
            assert!(state.exploding);
        }
        let events = tick(&mut state, &idle(), 0.0);
        assert_eq!(events, vec![GameEvent::ExplosionFinished]);
        assert!(state.explosion_done);
        assert!(!state.exploding);
        // World stayed frozen throughout
        assert_eq!(state.asteroids[0].pos.x, 300.0);

        // Game-over end state is inert
        assert!(tick(&mut state, &idle(), 0.0).is_empty());
        assert_eq!(state.asteroids[0].pos.x, 300.0);
    }

    #[test]
    fn test_scroll_wraps() {
        let mut state = GameState::new();
        state.scroll_x = -GAME_WIDTH + 0.5;
        tick(&mut state, &idle(), 0.0);
        assert_eq!(state.scroll_x, 0.0);
    }

    proptest! {
        #[test]
        fn ship_stays_in_bounds(moves in proptest::collection::vec(0u8..3, 1..400)) {
            let mut state = GameState::new();
            for m in moves {
                let input = TickInput {
                    move_up: m == 1,
                    move_down: m == 2,
                    ..Default::default()
                };
                tick(&mut state, &input, 0.0);
                prop_assert!(state.ship.pos.y >= TOP_BOUNDARY);
                prop_assert!(state.ship.pos.y <= GAME_HEIGHT - state.ship.size.y);
                prop_assert!(state.ship.health <= HEALTH_CAP);
                prop_assert!((1..=FIRE_RATE_CAP).contains(&state.ship.fire_rate));
            }
        }
    }
}
