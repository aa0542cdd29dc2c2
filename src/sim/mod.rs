//! Simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only (host timestamps are used for fire cadence)
//! - Randomness injected through `&mut impl Rng`
//! - Insertion-order iteration, no entity priorities
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use clock::ElapsedClock;
pub use collision::{Rect, overlaps};
pub use spawn::{
    asteroid_delay, choose_power_up, large_asteroid_chance, power_up_delay, spawn_asteroid,
    spawn_power_up, stage,
};
pub use state::{
    Asteroid, Bullet, FrameAnimation, GameEvent, GameState, PowerUp, PowerUpKind, Ship,
};
pub use tick::{TickInput, tick};
