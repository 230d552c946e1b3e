//! Cave Flyer - a side-scrolling cave arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain, scrolling, vehicle, collisions)
//! - `driver`: Repeating tick task and restart timer over a virtual clock
//! - `game`: Running/Paused state machine, reset sequence, presentation sync
//! - `present`: Render, score and pause-indicator sinks
//! - `settings`: Board size, tuning and timing, loadable from JSON

pub mod driver;
pub mod game;
pub mod present;
pub mod settings;
pub mod sim;

pub use game::{ClockState, Game};
pub use present::{EntityHandle, EntityKind, HeadlessPresenter, Presenter};
pub use settings::{Board, Settings, SettingsError, Tuning};

/// Game configuration constants
pub mod consts {
    /// Board dimensions
    pub const BOARD_WIDTH: f32 = 800.0;
    pub const BOARD_HEIGHT: f32 = 480.0;

    /// Tick interval of the simulation driver (milliseconds)
    pub const REFRESH_RATE_MS: u64 = 20;
    /// Delay between a crash and the next session (milliseconds)
    pub const RESET_DELAY_MS: u64 = 500;
    /// Maximum ticks run per host frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Cave walls: pitch between segments and scroll speed per tick
    pub const WALL_WIDTH: f32 = 10.0;
    pub const WALL_SPEED: f32 = 10.0;
    /// Random walk step applied to each wall thickness
    pub const WALL_STEP: f32 = 5.0;
    pub const MIN_WALL_HEIGHT: f32 = 50.0;
    /// Default max wall thickness is this fraction of the board height
    pub const MAX_WALL_HEIGHT_FRACTION: f32 = 1.0 / 8.0;

    /// Vehicle defaults
    pub const VEHICLE_WIDTH: f32 = 50.0;
    pub const VEHICLE_HEIGHT: f32 = 30.0;
    pub const VEHICLE_START_X: f32 = 20.0;
    /// Upward acceleration while ascend is held (per tick²)
    pub const THRUST_ACCEL: f32 = 0.3;
    /// Downward acceleration otherwise (per tick²)
    pub const GRAVITY_ACCEL: f32 = 0.5;

    /// Gap obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 50.0;
    pub const OBSTACLE_HEIGHT: f32 = 150.0;
    /// Spawn y = anchor * board height - random * (obstacle height + spread)
    pub const OBSTACLE_ANCHOR: f32 = 0.6;
    pub const OBSTACLE_SPREAD: f32 = 100.0;
}
