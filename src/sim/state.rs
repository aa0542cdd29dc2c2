//! Game state and core simulation types
//!
//! The entity store for one run: ship, bullets, asteroids and power-ups,
//! plus score and the ship-destruction flags.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// Frame-counter animation shared by every destructible entity
///
/// Advances one frame every `ticks_per_frame` ticks. Finished once the frame
/// index walks past the last frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameAnimation {
    pub frame: usize,
    pub timer: u32,
    pub frame_count: usize,
    pub ticks_per_frame: u32,
}

impl FrameAnimation {
    pub fn new(frame_count: usize, ticks_per_frame: u32) -> Self {
        Self {
            frame: 0,
            timer: 0,
            frame_count,
            ticks_per_frame,
        }
    }

    pub fn reset(&mut self) {
        self.frame = 0;
        self.timer = 0;
    }

    /// Advance by one tick. Returns true when the frame index moved.
    pub fn tick(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        self.timer += 1;
        if self.timer >= self.ticks_per_frame {
            self.timer = 0;
            self.frame += 1;
            true
        } else {
            false
        }
    }

    pub fn is_finished(&self) -> bool {
        self.frame >= self.frame_count
    }

    /// Frame to draw, or None once the animation has run out
    pub fn current_frame(&self) -> Option<usize> {
        (!self.is_finished()).then_some(self.frame)
    }
}

/// The player's drone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub moving_up: bool,
    pub moving_down: bool,
    /// Continuous-fire mode (fire held)
    pub firing: bool,
    pub health: u8,
    /// Shots per second
    pub fire_rate: u8,
    /// Earliest timestamp (ms) at which the next shot may leave
    pub next_fire_time: f64,
    pub explosion: FrameAnimation,
}

impl Default for Ship {
    fn default() -> Self {
        Self {
            pos: Vec2::new(SHIP_START_X, SHIP_START_Y),
            size: Vec2::splat(SHIP_SIZE),
            speed: SHIP_SPEED,
            moving_up: false,
            moving_down: false,
            firing: false,
            health: START_HEALTH,
            fire_rate: START_FIRE_RATE,
            next_fire_time: 0.0,
            explosion: FrameAnimation::new(EXPLOSION_FRAMES, EXPLOSION_TICKS_PER_FRAME),
        }
    }
}

impl Ship {
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Lowest y the ship may reach
    pub fn max_y(&self) -> f32 {
        GAME_HEIGHT - self.size.y
    }

    /// Clamp vertical position into the play area below the HUD
    pub fn clamp_to_bounds(&mut self) {
        self.pos.y = self.pos.y.clamp(TOP_BOUNDARY, self.max_y());
    }

    /// Apply held-direction flags for one tick
    pub fn apply_movement(&mut self) {
        if self.moving_up {
            self.pos.y -= self.speed;
        }
        if self.moving_down {
            self.pos.y += self.speed;
        }
        self.clamp_to_bounds();
    }

    /// Move the ship so its center sits at `y` (touch drag)
    pub fn center_on(&mut self, y: f32) {
        self.pos.y = y - self.size.y / 2.0;
        self.clamp_to_bounds();
    }

    pub fn fire_interval_ms(&self) -> f64 {
        1000.0 / self.fire_rate.max(1) as f64
    }

    /// Fire a bullet if the cooldown has elapsed
    pub fn try_fire(&mut self, now: f64) -> Option<Bullet> {
        if now < self.next_fire_time {
            return None;
        }
        self.next_fire_time = now + self.fire_interval_ms();
        Some(Bullet::from_ship(self))
    }

    /// Subtract damage, saturating at zero. Returns true if the ship died.
    pub fn take_damage(&mut self, damage: u8) -> bool {
        self.health = self.health.saturating_sub(damage);
        self.health == 0
    }

    /// Apply a collected power-up
    pub fn apply_power_up(&mut self, kind: PowerUpKind, now: f64) {
        match kind {
            PowerUpKind::FireRate => {
                self.fire_rate = (self.fire_rate + 1).min(FIRE_RATE_CAP);
                // Faster cadence takes effect on the very next shot
                self.next_fire_time = self.next_fire_time.min(now);
            }
            PowerUpKind::Health => {
                self.health = (self.health + 1).min(HEALTH_CAP);
            }
        }
    }

    /// Whether the stat boosted by `kind` is already maxed
    pub fn is_capped(&self, kind: PowerUpKind) -> bool {
        match kind {
            PowerUpKind::FireRate => self.fire_rate >= FIRE_RATE_CAP,
            PowerUpKind::Health => self.health >= HEALTH_CAP,
        }
    }
}

/// A laser bolt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
}

impl Bullet {
    pub fn from_ship(ship: &Ship) -> Self {
        Self {
            pos: Vec2::new(
                ship.pos.x + ship.size.x - 4.0,
                ship.pos.y + ship.size.y / 2.0 - BULLET_HEIGHT / 2.0,
            ),
            size: Vec2::new(BULLET_WIDTH, BULLET_HEIGHT),
            speed: BULLET_SPEED,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// An asteroid drifting in from the right
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    /// Remaining bullet hits before destruction
    pub hit_count: u8,
    /// Health removed from the ship on contact
    pub damage: u8,
    pub large: bool,
    /// Visual variant for small asteroids (0 or 1)
    pub variant: u8,
    pub destroyed: bool,
    pub animation: FrameAnimation,
}

impl Asteroid {
    pub fn small(x: f32, y: f32, variant: u8) -> Self {
        let variant = variant.min(1);
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::splat(SMALL_ASTEROID_SIZE),
            speed: SMALL_ASTEROID_SPEEDS[variant as usize],
            hit_count: 1,
            damage: 1,
            large: false,
            variant,
            destroyed: false,
            animation: FrameAnimation::new(SMALL_DESTROY_FRAMES, ASTEROID_TICKS_PER_FRAME),
        }
    }

    pub fn large(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::splat(LARGE_ASTEROID_SIZE),
            speed: LARGE_ASTEROID_SPEED,
            hit_count: LARGE_ASTEROID_HITS,
            damage: LARGE_ASTEROID_DAMAGE,
            large: true,
            variant: 0,
            destroyed: false,
            animation: FrameAnimation::new(LARGE_DESTROY_FRAMES, ASTEROID_TICKS_PER_FRAME),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    pub fn score(&self) -> u64 {
        if self.large {
            LARGE_ASTEROID_SCORE
        } else {
            SMALL_ASTEROID_SCORE
        }
    }

    /// Enter the destroyed sub-state and restart the debris animation
    pub fn destroy(&mut self) {
        self.destroyed = true;
        self.hit_count = 0;
        self.animation.reset();
    }

    /// Register one bullet hit. Returns true if this hit destroyed it.
    pub fn absorb_hit(&mut self) -> bool {
        self.hit_count = self.hit_count.saturating_sub(1);
        if self.hit_count == 0 {
            self.destroy();
            true
        } else {
            false
        }
    }

    /// Fully past the left edge
    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.size.x <= 0.0
    }

    pub fn is_removable(&self) -> bool {
        self.is_off_screen() || (self.destroyed && self.animation.is_finished())
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    FireRate,
    Health,
}

impl PowerUpKind {
    pub fn other(self) -> Self {
        match self {
            PowerUpKind::FireRate => PowerUpKind::Health,
            PowerUpKind::Health => PowerUpKind::FireRate,
        }
    }
}

/// A collectible drifting toward the ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: PowerUpKind,
    pub collected: bool,
    pub vel: Vec2,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::splat(POWER_UP_SIZE),
            kind,
            collected: false,
            vel: Vec2::new(-POWER_UP_DRIFT, 0.0),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.size.x <= 0.0
    }
}

/// Things that happened during a tick, for audio and lifecycle routing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    BulletFired,
    /// Bullet hit an asteroid that survived
    AsteroidHit,
    AsteroidDestroyed { large: bool, score: u64 },
    ShipHit { damage: u8, health: u8 },
    PowerUpCollected(PowerUpKind),
    /// Health reached zero; explosion sequence started
    ShipDestroyed,
    /// Explosion animation exhausted
    ExplosionFinished,
}

/// Complete state of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub ship: Ship,
    pub bullets: Vec<Bullet>,
    pub asteroids: Vec<Asteroid>,
    pub power_ups: Vec<PowerUp>,
    pub score: u64,
    /// Background scroll offset (wraps at -GAME_WIDTH)
    pub scroll_x: f32,
    pub game_over: bool,
    pub exploding: bool,
    pub explosion_done: bool,
    /// Nominal type of the next power-up spawn
    pub next_power_up: PowerUpKind,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            ship: Ship::default(),
            bullets: Vec::new(),
            asteroids: Vec::new(),
            power_ups: Vec::new(),
            score: 0,
            scroll_x: 0.0,
            game_over: false,
            exploding: false,
            explosion_done: false,
            next_power_up: PowerUpKind::FireRate,
            time_ticks: 0,
        }
    }

    pub fn has_uncollected_power_up(&self) -> bool {
        self.power_ups.iter().any(|p| !p.collected)
    }

    /// Start the ship-destruction sequence. No-op if already started.
    pub fn trigger_explosion(&mut self) -> bool {
        if self.exploding || self.game_over {
            return false;
        }
        self.ship.firing = false;
        self.ship.moving_up = false;
        self.ship.moving_down = false;
        self.ship.explosion.reset();
        self.exploding = true;
        self.game_over = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animation_advances_every_n_ticks() {
        let mut anim = FrameAnimation::new(3, 6);
        for _ in 0..5 {
            assert!(!anim.tick());
        }
        assert!(anim.tick());
        assert_eq!(anim.frame, 1);
        assert_eq!(anim.timer, 0);
    }

    #[test]
    fn test_animation_finishes() {
        let mut anim = FrameAnimation::new(2, 1);
        assert_eq!(anim.current_frame(), Some(0));
        anim.tick();
        anim.tick();
        assert!(anim.is_finished());
        assert_eq!(anim.current_frame(), None);
        // Stays put once finished
        assert!(!anim.tick());
        assert_eq!(anim.frame, 2);
    }

    #[test]
    fn test_ship_fire_cadence() {
        let mut ship = Ship::default();
        assert!(ship.try_fire(1000.0).is_some());
        assert!(ship.try_fire(1100.0).is_none());
        let next = 1000.0 + 1000.0 / START_FIRE_RATE as f64;
        assert!(ship.try_fire(next).is_some());
    }

    #[test]
    fn test_fire_rate_power_up_unblocks_cooldown() {
        let mut ship = Ship::default();
        ship.try_fire(1000.0);
        assert!(ship.next_fire_time > 1000.0);
        ship.apply_power_up(PowerUpKind::FireRate, 1010.0);
        assert_eq!(ship.fire_rate, START_FIRE_RATE + 1);
        assert!(ship.try_fire(1010.0).is_some());
    }

    #[test]
    fn test_power_ups_clamp_at_cap() {
        let mut ship = Ship::default();
        ship.fire_rate = FIRE_RATE_CAP;
        ship.health = HEALTH_CAP;
        ship.apply_power_up(PowerUpKind::FireRate, 0.0);
        ship.apply_power_up(PowerUpKind::Health, 0.0);
        assert_eq!(ship.fire_rate, FIRE_RATE_CAP);
        assert_eq!(ship.health, HEALTH_CAP);
        assert!(ship.is_capped(PowerUpKind::FireRate));
        assert!(ship.is_capped(PowerUpKind::Health));
    }

    #[test]
    fn test_damage_saturates() {
        let mut ship = Ship::default();
        ship.health = 1;
        assert!(ship.take_damage(LARGE_ASTEROID_DAMAGE));
        assert_eq!(ship.health, 0);
    }

    #[test]
    fn test_large_asteroid_absorbs_three_hits() {
        let mut asteroid = Asteroid::large(100.0, 100.0);
        assert!(!asteroid.absorb_hit());
        assert!(!asteroid.absorb_hit());
        assert!(asteroid.absorb_hit());
        assert!(asteroid.destroyed);
    }

    #[test]
    fn test_asteroid_removal_rule() {
        let mut asteroid = Asteroid::small(-SMALL_ASTEROID_SIZE, 100.0, 0);
        assert!(asteroid.is_removable());

        asteroid.pos.x = 200.0;
        assert!(!asteroid.is_removable());
        asteroid.destroy();
        assert!(!asteroid.is_removable());
        asteroid.animation.frame = SMALL_DESTROY_FRAMES;
        assert!(asteroid.is_removable());
    }

    #[test]
    fn test_trigger_explosion_once() {
        let mut state = GameState::new();
        state.ship.firing = true;
        assert!(state.trigger_explosion());
        assert!(!state.ship.firing);
        assert!(state.game_over && state.exploding);
        assert!(!state.trigger_explosion());
    }
}
