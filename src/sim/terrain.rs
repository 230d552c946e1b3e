//! Cave terrain generation
//!
//! Each segment's wall thicknesses come from its predecessor by an
//! independent ±step random walk per wall, clamped to the wall bounds.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::settings::{Board, Tuning};

/// One slice of the cave: a top wall and a bottom wall sharing an x
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaveSegment {
    pub id: u32,
    /// Left edge of both walls
    pub x: f32,
    /// Top wall thickness, measured down from the board's top edge
    pub top: f32,
    /// Bottom wall thickness, measured up from the board's bottom edge
    pub bottom: f32,
}

impl CaveSegment {
    /// Lowest y covered by the top wall
    #[inline]
    pub fn top_wall_bottom(&self) -> f32 {
        self.top
    }

    /// Highest y covered by the bottom wall
    #[inline]
    pub fn bottom_wall_top(&self, board: &Board) -> f32 {
        board.height - self.bottom
    }

    /// Navigable height between the walls
    pub fn gap_height(&self, board: &Board) -> f32 {
        board.height - self.top - self.bottom
    }

    pub fn top_wall_rect(&self, width: f32) -> Rect {
        Rect::new(self.x, 0.0, width, self.top)
    }

    pub fn bottom_wall_rect(&self, board: &Board, width: f32) -> Rect {
        Rect::new(self.x, self.bottom_wall_top(board), width, self.bottom)
    }
}

/// Produce the segment that follows `previous`, or the first segment of an
/// empty cave
pub fn generate_next_segment<R: Rng>(
    previous: Option<&CaveSegment>,
    id: u32,
    board: &Board,
    tuning: &Tuning,
    rng: &mut R,
) -> CaveSegment {
    let Some(previous) = previous else {
        return CaveSegment {
            id,
            x: 0.0,
            top: tuning.min_wall_height,
            bottom: tuning.min_wall_height,
        };
    };

    let min = tuning.min_wall_height;
    let max = tuning.max_wall_height(board);
    let top = walk(previous.top, tuning.wall_step, rng).max(min).min(max);
    let bottom = walk(previous.bottom, tuning.wall_step, rng).max(min).min(max);

    CaveSegment {
        id,
        x: previous.x + tuning.wall_width,
        top,
        bottom,
    }
}

fn walk<R: Rng>(thickness: f32, step: f32, rng: &mut R) -> f32 {
    if rng.random_bool(0.5) {
        thickness - step
    } else {
        thickness + step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_first_segment() {
        let board = Board::default();
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);

        let first = generate_next_segment(None, 1, &board, &tuning, &mut rng);
        assert_eq!(first.x, 0.0);
        assert_eq!(first.top, tuning.min_wall_height);
        assert_eq!(first.bottom, tuning.min_wall_height);
    }

    #[test]
    fn test_next_segment_steps_by_pitch_and_delta() {
        let board = Board::default();
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(2);
        let previous = CaveSegment {
            id: 1,
            x: 100.0,
            top: 55.0,
            bottom: 55.0,
        };

        let next = generate_next_segment(Some(&previous), 2, &board, &tuning, &mut rng);
        assert_eq!(next.x, 110.0);
        assert!(next.top == 50.0 || next.top == 60.0);
        assert!(next.bottom == 50.0 || next.bottom == 60.0);
    }

    #[test]
    fn test_walls_walk_independently() {
        let board = Board::default();
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut segment = CaveSegment {
            id: 0,
            x: 0.0,
            top: 55.0,
            bottom: 55.0,
        };

        let mut diverged = false;
        for id in 1..200 {
            segment = generate_next_segment(Some(&segment), id, &board, &tuning, &mut rng);
            diverged |= segment.top != segment.bottom;
        }
        assert!(diverged);
    }

    #[test]
    fn test_wall_rects() {
        let board = Board::default();
        let segment = CaveSegment {
            id: 1,
            x: 15.0,
            top: 60.0,
            bottom: 60.0,
        };
        assert_eq!(segment.top_wall_rect(10.0), Rect::new(15.0, 0.0, 10.0, 60.0));
        assert_eq!(
            segment.bottom_wall_rect(&board, 10.0),
            Rect::new(15.0, 420.0, 10.0, 60.0)
        );
        assert_eq!(segment.gap_height(&board), 360.0);
    }

    proptest! {
        #[test]
        fn thickness_stays_in_bounds(seed in any::<u64>(), count in 1usize..400) {
            let board = Board::default();
            let tuning = Tuning::default();
            let max = tuning.max_wall_height(&board);
            let mut rng = Pcg32::seed_from_u64(seed);

            let mut segment = generate_next_segment(None, 0, &board, &tuning, &mut rng);
            for id in 1..count as u32 {
                let next = generate_next_segment(Some(&segment), id, &board, &tuning, &mut rng);
                prop_assert!(next.top >= tuning.min_wall_height && next.top <= max);
                prop_assert!(next.bottom >= tuning.min_wall_height && next.bottom <= max);
                prop_assert!((next.top - segment.top).abs() <= tuning.wall_step);
                prop_assert!(next.gap_height(&board) > 0.0);
                segment = next;
            }
        }
    }
}
