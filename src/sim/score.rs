//! Score counter
//!
//! A plain counter; displaying it is the presenter's job, driven by
//! `SimEvent::Scored`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    points: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    /// Add points and return the new total
    pub fn add(&mut self, points: u32) -> u32 {
        self.points = self.points.saturating_add(points);
        self.points
    }
}
