//! Collision detection between the vehicle and everything that can kill it
//!
//! The cave scan relies on segments being ordered by ascending x: it stops
//! at the first segment the vehicle's leading edge has not reached yet.

use super::cave::Cave;
use super::obstacle::GapObstacle;
use super::vehicle::Vehicle;
use crate::settings::Board;

/// What the vehicle ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    GapObstacle,
    TopWall { segment: u32 },
    BottomWall { segment: u32 },
}

/// Check the vehicle against the gap obstacle, then the cave walls
pub fn find_collision(
    vehicle: &Vehicle,
    obstacle: &GapObstacle,
    cave: &Cave,
    board: &Board,
) -> Option<Collision> {
    if vehicle.rect().overlaps(&obstacle.rect()) {
        return Some(Collision::GapObstacle);
    }

    let rect = vehicle.rect();
    for segment in cave.segments() {
        // Segments at or beyond the leading edge cannot be touching yet
        if segment.x >= rect.right() {
            return None;
        }
        if rect.top() <= segment.top_wall_bottom() {
            return Some(Collision::TopWall {
                segment: segment.id,
            });
        }
        if rect.bottom() >= segment.bottom_wall_top(board) {
            return Some(Collision::BottomWall {
                segment: segment.id,
            });
        }
    }
    None
}

/// Whether the vehicle hit anything this tick
pub fn has_collision(vehicle: &Vehicle, obstacle: &GapObstacle, cave: &Cave, board: &Board) -> bool {
    find_collision(vehicle, obstacle, cave, board).is_some()
}
