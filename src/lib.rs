//! Asteroid Drone - A side-scrolling asteroid shooter
//!
//! Core modules:
//! - `sim`: Simulation (entities, collisions, spawning, elapsed-time clock)
//! - `game`: Lifecycle state machine, spawn timers and frame loop driver
//! - `renderer`: Presentation step over an abstract renderer
//! - `platform`: Input mapping and orientation
//! - `persistence`: Key/value store for settings and high score
//! - `tuning`: Data-driven difficulty curve

pub mod audio;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod story;
pub mod tuning;

pub use game::{Game, MissionReport, Phase};
pub use highscores::HighScore;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Logical playfield dimensions
    pub const GAME_WIDTH: f32 = 540.0;
    pub const GAME_HEIGHT: f32 = 270.0;

    /// HUD strip reserved at the top of the playfield
    pub const HEALTH_BAR_MARGIN: f32 = 8.0;
    pub const HEALTH_BAR_HEIGHT: f32 = 40.0;
    pub const HEALTH_BAR_WIDTH: f32 = 135.0;
    pub const TOP_BOUNDARY: f32 = HEALTH_BAR_MARGIN + HEALTH_BAR_HEIGHT + 4.0;

    /// Ship defaults
    pub const SHIP_START_X: f32 = 60.0;
    pub const SHIP_SIZE: f32 = 32.0;
    pub const SHIP_START_Y: f32 = GAME_HEIGHT / 2.0 - SHIP_SIZE / 2.0;
    pub const SHIP_SPEED: f32 = 2.5;
    pub const START_HEALTH: u8 = 2;
    pub const HEALTH_CAP: u8 = 4;
    /// Shots per second
    pub const START_FIRE_RATE: u8 = 3;
    pub const FIRE_RATE_CAP: u8 = 6;

    /// Bullet defaults
    pub const BULLET_WIDTH: f32 = 8.0;
    pub const BULLET_HEIGHT: f32 = 4.0;
    pub const BULLET_SPEED: f32 = 6.0;

    /// Asteroid defaults
    pub const SMALL_ASTEROID_SIZE: f32 = 32.0;
    pub const LARGE_ASTEROID_SIZE: f32 = 48.0;
    pub const SMALL_ASTEROID_SPEEDS: [f32; 2] = [1.8, 2.2];
    pub const LARGE_ASTEROID_SPEED: f32 = 1.6;
    pub const LARGE_ASTEROID_HITS: u8 = 3;
    pub const LARGE_ASTEROID_DAMAGE: u8 = 2;
    pub const SMALL_ASTEROID_SCORE: u64 = 10;
    pub const LARGE_ASTEROID_SCORE: u64 = 30;
    pub const ASTEROID_SPAWN_OFFSET: f32 = 30.0;
    pub const SMALL_DESTROY_FRAMES: usize = 3;
    pub const LARGE_DESTROY_FRAMES: usize = 4;
    pub const ASTEROID_TICKS_PER_FRAME: u32 = 6;

    /// Power-up defaults
    pub const POWER_UP_SIZE: f32 = 20.0;
    pub const POWER_UP_DRIFT: f32 = 1.2;
    pub const POWER_UP_SPAWN_OFFSET: f32 = 20.0;

    /// Ship explosion animation
    pub const EXPLOSION_FRAMES: usize = 4;
    pub const EXPLOSION_TICKS_PER_FRAME: u32 = 12;
    pub const EXPLOSION_PADDING: f32 = 8.0;

    /// Background parallax scroll per tick
    pub const SCROLL_SPEED: f32 = 1.2;
}
