//! Scrolling cave window
//!
//! Keeps the board tiled with cave segments: everything scrolls left each
//! tick, and the leftmost segment is swapped for a freshly generated one at
//! the right once it has fully left the board.

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::EntityIds;
use super::terrain::{CaveSegment, generate_next_segment};
use crate::settings::{Board, Tuning};

/// A segment swap performed during a scroll
#[derive(Debug, Clone, PartialEq)]
pub struct Recycled {
    pub removed: u32,
    pub added: u32,
}

/// Ordered cave segments, oldest (leftmost) first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cave {
    segments: VecDeque<CaveSegment>,
}

impl Cave {
    /// Generate segments until the board plus one pitch is covered
    pub fn fill<R: Rng>(board: &Board, tuning: &Tuning, ids: &mut EntityIds, rng: &mut R) -> Self {
        let mut cave = Self {
            segments: VecDeque::new(),
        };
        loop {
            cave.push_next(board, tuning, ids, rng);
            if cave.last_x() >= board.width + tuning.wall_width {
                break;
            }
        }
        log::debug!("Cave filled with {} segments", cave.len());
        cave
    }

    /// Build a cave from already ordered segments
    pub fn from_segments(segments: impl IntoIterator<Item = CaveSegment>) -> Self {
        let segments: VecDeque<CaveSegment> = segments.into_iter().collect();
        debug_assert!(
            segments.iter().zip(segments.iter().skip(1)).all(|(a, b)| a.x < b.x),
            "cave segments must be ordered by x"
        );
        Self { segments }
    }

    /// Scroll every segment left by one tick, recycling at most one segment
    pub fn scroll<R: Rng>(
        &mut self,
        board: &Board,
        tuning: &Tuning,
        ids: &mut EntityIds,
        rng: &mut R,
    ) -> Option<Recycled> {
        for segment in &mut self.segments {
            segment.x -= tuning.wall_speed;
        }

        let expired = self
            .segments
            .front()
            .is_some_and(|first| first.x < -tuning.wall_width);

        let recycled = if expired {
            let removed = self.segments.pop_front().map(|s| s.id)?;
            let added = self.push_next(board, tuning, ids, rng);
            log::trace!("Recycled cave segment {removed} as {added}");
            Some(Recycled { removed, added })
        } else {
            None
        };

        debug_assert!(
            self.is_contiguous(tuning.wall_width),
            "cave segments lost their pitch"
        );
        recycled
    }

    fn push_next<R: Rng>(
        &mut self,
        board: &Board,
        tuning: &Tuning,
        ids: &mut EntityIds,
        rng: &mut R,
    ) -> u32 {
        let id = ids.next_id();
        let segment = generate_next_segment(self.segments.back(), id, board, tuning, rng);
        self.segments.push_back(segment);
        id
    }

    pub fn segments(&self) -> impl Iterator<Item = &CaveSegment> {
        self.segments.iter()
    }

    pub fn get(&self, id: u32) -> Option<&CaveSegment> {
        self.segments.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// x of the newest (rightmost) segment
    pub fn last_x(&self) -> f32 {
        self.segments.back().map_or(f32::NEG_INFINITY, |s| s.x)
    }

    /// Whether consecutive segments are one pitch apart (up to rounding)
    pub fn is_contiguous(&self, pitch: f32) -> bool {
        let tolerance = pitch * 1e-4;
        self.segments
            .iter()
            .zip(self.segments.iter().skip(1))
            .all(|(a, b)| (b.x - a.x - pitch).abs() <= tolerance)
    }
}
