//! Platform glue shared by every host
//!
//! Maps raw keyboard codes and viewport sizes onto game commands, so the
//! browser host stays a thin layer of event listeners.

use crate::game::{Game, Phase};

/// Keyboard action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveUp,
    MoveDown,
    Fire,
    Pause,
}

impl Action {
    /// Map a `KeyboardEvent.code`
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowUp" | "KeyW" => Some(Action::MoveUp),
            "ArrowDown" | "KeyS" => Some(Action::MoveDown),
            "Space" => Some(Action::Fire),
            "Escape" => Some(Action::Pause),
            _ => None,
        }
    }
}

/// Feed a key press or release into the game.
///
/// Returns true if the key was recognised (the host should then suppress
/// the browser default, e.g. page scrolling on Space).
pub fn apply_key(game: &mut Game, code: &str, pressed: bool, now: f64) -> bool {
    let Some(action) = Action::from_code(code) else {
        return false;
    };
    match action {
        Action::Pause => {
            if pressed && matches!(game.phase(), Phase::Playing | Phase::Paused) {
                game.toggle_pause(now);
            }
        }
        Action::MoveUp => game.set_move_up(pressed),
        Action::MoveDown => game.set_move_down(pressed),
        Action::Fire => game.set_firing(pressed),
    }
    true
}

/// Viewport orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Landscape,
    Portrait,
}

impl Orientation {
    pub fn from_viewport(width: f64, height: f64) -> Self {
        if height > width {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }

    /// The playfield is landscape-only
    pub fn is_compatible(self) -> bool {
        self == Orientation::Landscape
    }
}

/// Map a client-space y coordinate on the scaled canvas to playfield units
pub fn client_to_playfield_y(client_y: f64, canvas_top: f64, scale: f64) -> f32 {
    ((client_y - canvas_top) * scale) as f32
}
