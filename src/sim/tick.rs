//! Fixed timestep simulation tick
//!
//! One tick: scroll the cave, move the vehicle, move the gap obstacle, then
//! look for a collision. Deciding what a collision means is up to the caller.

use rand::Rng;

use super::collision::{Collision, find_collision};
use super::obstacle::GapObstacle;
use super::state::{Entity, SessionState, SimEvent};
use crate::settings::Tuning;

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Crashed(Collision),
}

/// Advance the session by one fixed timestep
pub fn tick<R: Rng>(state: &mut SessionState, tuning: &Tuning, rng: &mut R) -> TickOutcome {
    state.events.clear();
    state.time_ticks += 1;

    // 1. Scroll the cave window
    let board = state.board;
    let (cave, ids) = state.cave_and_ids();
    if let Some(recycled) = cave.scroll(&board, tuning, ids, rng) {
        state.events.extend([
            SimEvent::Despawned(Entity::TopWall(recycled.removed)),
            SimEvent::Despawned(Entity::BottomWall(recycled.removed)),
            SimEvent::Spawned(Entity::TopWall(recycled.added)),
            SimEvent::Spawned(Entity::BottomWall(recycled.added)),
        ]);
    }

    // 2. Vehicle dynamics from the held keys
    state.vehicle.integrate(&state.input, tuning);

    // 3. Gap obstacle; a full crossing respawns it and scores
    if state.obstacle.advance(tuning) {
        let old = state.obstacle.id;
        let id = state.next_entity_id();
        state.obstacle = GapObstacle::spawn(id, &board, tuning, rng);
        let total = state.score.add(1);
        log::debug!("Obstacle {old} passed at tick {}, score {total}", state.time_ticks);
        state.events.extend([
            SimEvent::Despawned(Entity::GapObstacle(old)),
            SimEvent::Spawned(Entity::GapObstacle(id)),
            SimEvent::Scored(total),
        ]);
    }

    // 4. Collisions
    match find_collision(&state.vehicle, &state.obstacle, &state.cave, &board) {
        Some(collision) => TickOutcome::Crashed(collision),
        None => TickOutcome::Continue,
    }
}
