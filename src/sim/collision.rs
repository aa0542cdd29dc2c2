//! Axis-aligned rectangle collision
//!
//! Every pairwise interaction in the game (bullet vs asteroid, asteroid vs
//! ship, power-up vs ship) goes through [`overlaps`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Grow the rectangle by `pad` on every side
    pub fn inflate(&self, pad: f32) -> Self {
        Self {
            pos: self.pos - Vec2::splat(pad),
            size: self.size + Vec2::splat(pad * 2.0),
        }
    }
}

/// Strict overlap test. Rectangles that only share an edge do not overlap.
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.pos.x < b.right() && a.right() > b.pos.x && a.pos.y < b.bottom() && a.bottom() > b.pos.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlapping_rects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(overlaps(&a, &b));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!overlaps(&a, &right));
        assert!(!overlaps(&a, &below));
    }

    #[test]
    fn test_contained_rect_overlaps() {
        let outer = Rect::new(0.0, 0.0, 50.0, 50.0);
        let inner = Rect::new(20.0, 20.0, 4.0, 4.0);
        assert!(overlaps(&outer, &inner));
        assert!(overlaps(&inner, &outer));
    }

    #[test]
    fn test_inflate() {
        let r = Rect::new(10.0, 10.0, 32.0, 32.0).inflate(8.0);
        assert_eq!(r, Rect::new(2.0, 2.0, 48.0, 48.0));
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            ax in -100.0f32..600.0, ay in -100.0f32..300.0, aw in 1.0f32..64.0, ah in 1.0f32..64.0,
            bx in -100.0f32..600.0, by in -100.0f32..300.0, bw in 1.0f32..64.0, bh in 1.0f32..64.0,
        ) {
            let a = Rect::new(ax, ay, aw, ah);
            let b = Rect::new(bx, by, bw, bh);
            prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }

        #[test]
        fn rect_overlaps_itself(x in -100.0f32..600.0, y in -100.0f32..300.0, w in 1.0f32..64.0, h in 1.0f32..64.0) {
            let r = Rect::new(x, y, w, h);
            prop_assert!(overlaps(&r, &r));
        }
    }
}
