//! Axis-aligned rectangle geometry
//!
//! Board coordinates: x grows to the right, y grows downward, origin at the
//! top-left corner of the board.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle anchored at its top-left corner
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
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Overlap test with touching edges counted as overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.top() <= other.bottom()
            && self.bottom() >= other.top()
            && self.right() >= other.left()
            && self.left() <= other.right()
    }
}
