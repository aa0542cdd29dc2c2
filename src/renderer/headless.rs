//! Renderer that records draw calls instead of painting
//!
//! Used by the native build and by tests.

use std::collections::HashSet;

use super::{Hud, Renderer, Sprite};
use crate::sim::Rect;

#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    frame: Vec<(Sprite, Rect)>,
    hud: Option<Hud>,
    frames: u64,
    skipped: u64,
    missing: HashSet<Sprite>,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend an asset failed to load
    pub fn missing(mut self, sprite: Sprite) -> Self {
        self.missing.insert(sprite);
        self
    }

    /// Sprites drawn since the last clear
    pub fn last_frame(&self) -> &[(Sprite, Rect)] {
        &self.frame
    }

    pub fn hud(&self) -> Option<Hud> {
        self.hud
    }

    /// Frames presented
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Draw calls dropped for missing assets
    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}

impl Renderer for HeadlessRenderer {
    fn clear(&mut self) {
        self.frame.clear();
        self.hud = None;
        self.frames += 1;
    }

    fn draw_background(&mut self, _scroll_x: f32) {}

    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect) -> bool {
        if self.missing.contains(&sprite) {
            self.skipped += 1;
            return false;
        }
        self.frame.push((sprite, rect));
        true
    }

    fn draw_hud(&mut self, hud: &Hud) {
        self.hud = Some(*hud);
    }
}
