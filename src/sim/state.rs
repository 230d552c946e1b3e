//! Session state and core simulation types
//!
//! A session is everything a crash throws away: vehicle, cave, obstacle,
//! score and held keys. The game driver owns it and rebuilds it wholesale.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::cave::Cave;
use super::geometry::Rect;
use super::input::InputLatch;
use super::obstacle::GapObstacle;
use super::score::Score;
use super::vehicle::Vehicle;
use crate::present::EntityKind;
use crate::settings::{Board, Tuning};

/// Allocates session-unique entity ids in creation order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityIds {
    next: u32,
}

impl Default for EntityIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl EntityIds {
    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// A single rendered element of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Entity {
    Vehicle,
    TopWall(u32),
    BottomWall(u32),
    GapObstacle(u32),
}

/// Things that happened during a tick, for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimEvent {
    Spawned(Entity),
    Despawned(Entity),
    Scored(u32),
}

/// Where and what to draw for one entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Renderable {
    pub entity: Entity,
    pub kind: EntityKind,
    pub rect: Rect,
}

/// Complete state of one play session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub board: Board,
    pub vehicle: Vehicle,
    pub cave: Cave,
    pub obstacle: GapObstacle,
    pub score: Score,
    pub input: InputLatch,
    /// Ticks simulated in this session
    pub time_ticks: u64,
    /// Events from the most recent tick (or from creation)
    #[serde(skip)]
    pub events: Vec<SimEvent>,
    ids: EntityIds,
}

impl SessionState {
    /// Build a fresh session: tiled cave, obstacle at the right edge,
    /// vehicle at rest at its start position, score zero
    pub fn new<R: Rng>(board: Board, tuning: &Tuning, rng: &mut R) -> Self {
        let mut ids = EntityIds::default();
        let cave = Cave::fill(&board, tuning, &mut ids, rng);
        let obstacle = GapObstacle::spawn(ids.next_id(), &board, tuning, rng);
        let vehicle = Vehicle::spawn(&board, tuning);

        let mut events = Vec::with_capacity(cave.len() * 2 + 2);
        for segment in cave.segments() {
            events.push(SimEvent::Spawned(Entity::TopWall(segment.id)));
            events.push(SimEvent::Spawned(Entity::BottomWall(segment.id)));
        }
        events.push(SimEvent::Spawned(Entity::GapObstacle(obstacle.id)));
        events.push(SimEvent::Spawned(Entity::Vehicle));

        Self {
            board,
            vehicle,
            cave,
            obstacle,
            score: Score::new(),
            input: InputLatch::new(),
            time_ticks: 0,
            events,
            ids,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        self.ids.next_id()
    }

    /// Split borrow for the cave scroll, which allocates ids as it recycles
    pub(crate) fn cave_and_ids(&mut self) -> (&mut Cave, &mut EntityIds) {
        (&mut self.cave, &mut self.ids)
    }

    /// Every live entity with its current placement
    pub fn renderables(&self, tuning: &Tuning) -> Vec<Renderable> {
        let mut out = Vec::with_capacity(self.cave.len() * 2 + 2);
        for segment in self.cave.segments() {
            out.push(Renderable {
                entity: Entity::TopWall(segment.id),
                kind: EntityKind::CaveWall,
                rect: segment.top_wall_rect(tuning.wall_width),
            });
            out.push(Renderable {
                entity: Entity::BottomWall(segment.id),
                kind: EntityKind::CaveWall,
                rect: segment.bottom_wall_rect(&self.board, tuning.wall_width),
            });
        }
        out.push(Renderable {
            entity: Entity::GapObstacle(self.obstacle.id),
            kind: EntityKind::GapObstacle,
            rect: self.obstacle.rect(),
        });
        out.push(Renderable {
            entity: Entity::Vehicle,
            kind: EntityKind::Vehicle,
            rect: self.vehicle.rect(),
        });
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_new_session() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let state = SessionState::new(Board::default(), &tuning, &mut rng);

        assert_eq!(state.score.points(), 0);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.vehicle, Vehicle::spawn(&state.board, &tuning));
        assert_eq!(state.obstacle.pos.x, 800.0);
        assert_eq!(state.cave.len(), 82);
        assert!(state.cave.last_x() >= 810.0);
    }

    #[test]
    fn test_creation_events_cover_every_renderable() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(2);
        let state = SessionState::new(Board::default(), &tuning, &mut rng);

        let renderables = state.renderables(&tuning);
        assert_eq!(state.events.len(), renderables.len());
        for r in &renderables {
            assert!(state.events.contains(&SimEvent::Spawned(r.entity)));
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut state = SessionState::new(Board::default(), &tuning, &mut rng);

        let mut seen: Vec<u32> = state.cave.segments().map(|s| s.id).collect();
        seen.push(state.obstacle.id);
        let next = state.next_entity_id();
        assert!(!seen.contains(&next));
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), state.cave.len() + 1);
    }

    #[test]
    fn test_same_seed_same_session() {
        let tuning = Tuning::default();
        let a = SessionState::new(Board::default(), &tuning, &mut Pcg32::seed_from_u64(9));
        let b = SessionState::new(Board::default(), &tuning, &mut Pcg32::seed_from_u64(9));
        let walls = |s: &SessionState| {
            s.cave
                .segments()
                .map(|seg| (seg.x, seg.top, seg.bottom))
                .collect::<Vec<_>>()
        };
        assert_eq!(walls(&a), walls(&b));
        assert_eq!(a.obstacle, b.obstacle);
    }
}
