//! Idle/demo mode controller
//!
//! Decides each tick whether to hold the ascend key, steering the vehicle
//! toward the middle of the open space ahead and around the gap obstacle.

use super::state::SessionState;
use crate::settings::Tuning;

/// How far past the vehicle's leading edge the pilot looks at the cave
const CAVE_LOOKAHEAD: f32 = 60.0;
/// How far ahead the obstacle starts to matter
const OBSTACLE_LOOKAHEAD: f32 = 300.0;
/// Clearance kept from the obstacle when dodging it
const DODGE_MARGIN: f32 = 12.0;

/// Whether the autopilot wants thrust this tick
pub fn wants_thrust(state: &SessionState, tuning: &Tuning) -> bool {
    let vehicle = state.vehicle.rect();
    let board = &state.board;

    // Tightest opening across the stretch of cave just ahead
    let (mut ceiling, mut floor) = (0.0f32, board.height);
    for segment in state.cave.segments() {
        if segment.x + tuning.wall_width < vehicle.left() {
            continue;
        }
        if segment.x > vehicle.right() + CAVE_LOOKAHEAD {
            break;
        }
        ceiling = ceiling.max(segment.top_wall_bottom());
        floor = floor.min(segment.bottom_wall_top(board));
    }

    let half = vehicle.size.y / 2.0;
    let mut target = (ceiling + floor) / 2.0;

    // Pick the larger side of the obstacle once it gets close
    let obstacle = state.obstacle.rect();
    let approaching = obstacle.right() >= vehicle.left()
        && obstacle.left() <= vehicle.right() + OBSTACLE_LOOKAHEAD;
    if approaching {
        let above = obstacle.top() - ceiling;
        let below = floor - obstacle.bottom();
        target = if above >= below {
            let lane_bottom = obstacle.top() - DODGE_MARGIN - half;
            target.min((ceiling + obstacle.top()) / 2.0).min(lane_bottom)
        } else {
            let lane_top = obstacle.bottom() + DODGE_MARGIN + half;
            target.max((obstacle.bottom() + floor) / 2.0).max(lane_top)
        };
    }

    // Where the vehicle would come to rest if it started braking next tick
    let v = state.vehicle.velocity;
    let stopping = if v > 0.0 {
        v * v / (2.0 * tuning.thrust)
    } else {
        -v * v / (2.0 * tuning.gravity)
    };
    let predicted = vehicle.top() + half + v + stopping;
    predicted > target
}
