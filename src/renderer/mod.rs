//! Presentation step
//!
//! [`present`] walks the entity store after the simulation step and issues
//! draw calls to a [`Renderer`]. It never mutates state, so a failed draw
//! cannot disturb the simulation.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod headless;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use headless::HeadlessRenderer;

use crate::consts::*;
use crate::sim::{GameState, PowerUpKind, Rect};

/// Everything the renderer can be asked to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Ship,
    /// Ship explosion frame
    ShipExplosion(usize),
    Bullet,
    /// Intact small asteroid (variant 0 or 1)
    Asteroid(u8),
    LargeAsteroid,
    /// Destruction animation frame
    AsteroidDebris { large: bool, frame: usize },
    PowerUp(PowerUpKind),
}

/// HUD values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub health: u8,
    pub health_cap: u8,
    pub fire_rate: u8,
    pub fire_rate_cap: u8,
    pub score: u64,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            health: state.ship.health,
            health_cap: HEALTH_CAP,
            fire_rate: state.ship.fire_rate,
            fire_rate_cap: FIRE_RATE_CAP,
            score: state.score,
        }
    }
}

/// Drawing surface
pub trait Renderer {
    fn clear(&mut self) {}
    /// Scrolling background at horizontal offset `scroll_x` (<= 0)
    fn draw_background(&mut self, scroll_x: f32);
    /// Draw a sprite. Returns false if the asset is missing and was skipped.
    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect) -> bool;
    fn draw_hud(&mut self, hud: &Hud);
}

/// Render the current entity store
pub fn present(state: &GameState, renderer: &mut dyn Renderer) {
    renderer.clear();
    renderer.draw_background(state.scroll_x);

    let ship = &state.ship;
    if state.exploding {
        if let Some(frame) = ship.explosion.current_frame() {
            renderer.draw_sprite(
                Sprite::ShipExplosion(frame),
                ship.rect().inflate(EXPLOSION_PADDING),
            );
        }
    } else if !state.explosion_done {
        renderer.draw_sprite(Sprite::Ship, ship.rect());
    }

    for bullet in &state.bullets {
        renderer.draw_sprite(Sprite::Bullet, bullet.rect());
    }

    for asteroid in &state.asteroids {
        let sprite = if asteroid.destroyed {
            match asteroid.animation.current_frame() {
                Some(frame) => Sprite::AsteroidDebris {
                    large: asteroid.large,
                    frame,
                },
                None => continue,
            }
        } else if asteroid.large {
            Sprite::LargeAsteroid
        } else {
            Sprite::Asteroid(asteroid.variant)
        };
        renderer.draw_sprite(sprite, asteroid.rect());
    }

    for power_up in state.power_ups.iter().filter(|p| !p.collected) {
        renderer.draw_sprite(Sprite::PowerUp(power_up.kind), power_up.rect());
    }

    renderer.draw_hud(&Hud::from_state(state));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Asteroid, PowerUp};

    #[test]
    fn test_draw_order() {
        let mut state = GameState::new();
        state.asteroids.push(Asteroid::small(300.0, 100.0, 1));
        state
            .power_ups
            .push(PowerUp::new(PowerUpKind::Health, 400.0, 100.0));
        let mut renderer = HeadlessRenderer::new();

        present(&state, &mut renderer);

        let sprites: Vec<Sprite> = renderer.last_frame().iter().map(|(s, _)| *s).collect();
        assert_eq!(
            sprites,
            vec![
                Sprite::Ship,
                Sprite::Asteroid(1),
                Sprite::PowerUp(PowerUpKind::Health)
            ]
        );
        assert_eq!(renderer.hud().map(|h| h.health), Some(START_HEALTH));
        assert_eq!(renderer.frames(), 1);
    }

    #[test]
    fn test_explosion_replaces_ship() {
        let mut state = GameState::new();
        state.trigger_explosion();
        let mut renderer = HeadlessRenderer::new();
        present(&state, &mut renderer);
        assert_eq!(renderer.last_frame()[0].0, Sprite::ShipExplosion(0));
        assert_eq!(
            renderer.last_frame()[0].1,
            state.ship.rect().inflate(EXPLOSION_PADDING)
        );

        state.exploding = false;
        state.explosion_done = true;
        present(&state, &mut renderer);
        assert!(renderer.last_frame().is_empty());
    }

    #[test]
    fn test_debris_and_collected_power_ups() {
        let mut state = GameState::new();
        state.explosion_done = true;
        let mut debris = Asteroid::large(300.0, 100.0);
        debris.destroy();
        debris.animation.frame = 2;
        state.asteroids.push(debris);
        let mut finished = Asteroid::small(200.0, 100.0, 0);
        finished.destroy();
        finished.animation.frame = SMALL_DESTROY_FRAMES;
        state.asteroids.push(finished);
        let mut collected = PowerUp::new(PowerUpKind::FireRate, 100.0, 100.0);
        collected.collected = true;
        state.power_ups.push(collected);

        let mut renderer = HeadlessRenderer::new();
        present(&state, &mut renderer);

        assert_eq!(
            renderer.last_frame(),
            &[(
                Sprite::AsteroidDebris {
                    large: true,
                    frame: 2
                },
                state.asteroids[0].rect()
            )]
        );
    }

    #[test]
    fn test_missing_assets_do_not_stop_frame() {
        let state = GameState::new();
        let mut renderer = HeadlessRenderer::new().missing(Sprite::Ship);
        present(&state, &mut renderer);
        assert!(renderer.last_frame().is_empty());
        assert_eq!(renderer.skipped(), 1);
        assert!(renderer.hud().is_some());
    }
}
