//! The gap obstacle crossing the board
//!
//! Only one exists at a time. Each time it fully leaves the left edge it is
//! replaced at the right edge, which is what earns a point.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::settings::{Board, Tuning};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapObstacle {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
}

impl GapObstacle {
    /// Enter at the right edge with a randomized height in the lower board
    pub fn spawn<R: Rng>(id: u32, board: &Board, tuning: &Tuning, rng: &mut R) -> Self {
        let spread = tuning.obstacle_height + tuning.obstacle_spread;
        let y = board.height * tuning.obstacle_anchor - rng.random::<f32>() * spread;
        Self {
            id,
            pos: Vec2::new(board.width, y),
            size: Vec2::new(tuning.obstacle_width, tuning.obstacle_height),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Scroll left by one tick; returns true once fully off the left edge
    pub fn advance(&mut self, tuning: &Tuning) -> bool {
        self.pos.x -= tuning.wall_speed;
        self.has_exited()
    }

    pub fn has_exited(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }
}
