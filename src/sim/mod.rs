//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (cave segments oldest first)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod cave;
pub mod collision;
pub mod geometry;
pub mod input;
pub mod obstacle;
pub mod score;
pub mod state;
pub mod terrain;
pub mod tick;
pub mod vehicle;

pub use autopilot::wants_thrust;
pub use cave::{Cave, Recycled};
pub use collision::{Collision, find_collision, has_collision};
pub use geometry::Rect;
pub use input::{InputLatch, Key};
pub use obstacle::GapObstacle;
pub use score::Score;
pub use state::{Entity, EntityIds, Renderable, SessionState, SimEvent};
pub use terrain::{CaveSegment, generate_next_segment};
pub use tick::{TickOutcome, tick};
pub use vehicle::Vehicle;
