//! Game settings and tuning
//!
//! Everything that is fixed for a session: board size, cave and vehicle
//! tuning, driver timing and the RNG seed. Loaded from JSON; any field left
//! out of the file falls back to its default.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("board must have a positive size, got {width}x{height}")]
    Board { width: f32, height: f32 },
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("min wall height {min} exceeds max wall height {max}")]
    WallBounds { min: f32, max: f32 },
    #[error("two walls of max height {max} would close a board of height {height}")]
    GapClosed { max: f32, height: f32 },
    #[error("wall speed {speed} must not exceed the wall pitch {pitch}")]
    WallSpeed { speed: f32, pitch: f32 },
    #[error("{0} must be non-zero")]
    Zero(&'static str),
}

/// Fixed rectangular play area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Board {
    pub width: f32,
    pub height: f32,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
        }
    }
}

/// Gameplay tuning (distances in board units, accelerations per tick²)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Horizontal pitch between cave segments
    pub wall_width: f32,
    /// Scroll distance per tick, shared by cave and obstacle
    pub wall_speed: f32,
    /// Random walk step for wall thickness
    pub wall_step: f32,
    pub min_wall_height: f32,
    /// Defaults to an eighth of the board height when absent
    pub max_wall_height: Option<f32>,

    pub vehicle_width: f32,
    pub vehicle_height: f32,
    pub vehicle_start_x: f32,
    /// Defaults to half the board height when absent
    pub vehicle_start_y: Option<f32>,
    pub thrust: f32,
    pub gravity: f32,

    pub obstacle_width: f32,
    pub obstacle_height: f32,
    pub obstacle_anchor: f32,
    pub obstacle_spread: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            wall_width: WALL_WIDTH,
            wall_speed: WALL_SPEED,
            wall_step: WALL_STEP,
            min_wall_height: MIN_WALL_HEIGHT,
            max_wall_height: None,

            vehicle_width: VEHICLE_WIDTH,
            vehicle_height: VEHICLE_HEIGHT,
            vehicle_start_x: VEHICLE_START_X,
            vehicle_start_y: None,
            thrust: THRUST_ACCEL,
            gravity: GRAVITY_ACCEL,

            obstacle_width: OBSTACLE_WIDTH,
            obstacle_height: OBSTACLE_HEIGHT,
            obstacle_anchor: OBSTACLE_ANCHOR,
            obstacle_spread: OBSTACLE_SPREAD,
        }
    }
}

impl Tuning {
    /// Effective max wall thickness for a board
    pub fn max_wall_height(&self, board: &Board) -> f32 {
        self.max_wall_height
            .unwrap_or(board.height * MAX_WALL_HEIGHT_FRACTION)
    }

    /// Effective vehicle start height for a board
    pub fn vehicle_start_y(&self, board: &Board) -> f32 {
        self.vehicle_start_y.unwrap_or(board.height / 2.0)
    }
}

/// Session-wide settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub board: Board,
    pub tuning: Tuning,

    // === Driver timing ===
    /// Interval between simulation ticks
    pub tick_interval_ms: u64,
    /// Pause between a crash and the fresh session
    pub reset_delay_ms: u64,
    /// Max ticks per `Game::advance` before the backlog is dropped
    pub max_substeps: u32,

    /// RNG seed; a random one is drawn when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            board: Board::default(),
            tuning: Tuning::default(),
            tick_interval_ms: REFRESH_RATE_MS,
            reset_delay_ms: RESET_DELAY_MS,
            max_substeps: MAX_SUBSTEPS,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize settings to pretty JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.reset_delay_ms)
    }

    /// Reject tunings the simulation cannot run sensibly
    pub fn validate(&self) -> Result<(), SettingsError> {
        let board = &self.board;
        if board.width <= 0.0 || board.height <= 0.0 {
            return Err(SettingsError::Board {
                width: board.width,
                height: board.height,
            });
        }

        let t = &self.tuning;
        for (name, value) in [
            ("wall_width", t.wall_width),
            ("wall_speed", t.wall_speed),
            ("min_wall_height", t.min_wall_height),
            ("vehicle_width", t.vehicle_width),
            ("vehicle_height", t.vehicle_height),
            ("obstacle_width", t.obstacle_width),
            ("obstacle_height", t.obstacle_height),
        ] {
            if value <= 0.0 {
                return Err(SettingsError::NotPositive { name, value });
            }
        }

        let max = t.max_wall_height(board);
        if t.min_wall_height > max {
            return Err(SettingsError::WallBounds {
                min: t.min_wall_height,
                max,
            });
        }
        // Both walls walk independently, so only this keeps a gap open
        if 2.0 * max >= board.height {
            return Err(SettingsError::GapClosed {
                max,
                height: board.height,
            });
        }
        if t.wall_speed > t.wall_width {
            return Err(SettingsError::WallSpeed {
                speed: t.wall_speed,
                pitch: t.wall_width,
            });
        }

        if self.tick_interval_ms == 0 {
            return Err(SettingsError::Zero("tick_interval_ms"));
        }
        if self.max_substeps == 0 {
            return Err(SettingsError::Zero("max_substeps"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.tuning.max_wall_height(&settings.board), 60.0);
        assert_eq!(settings.tuning.vehicle_start_y(&settings.board), 240.0);
        assert_eq!(settings.tick_interval(), Duration::from_millis(20));
        assert_eq!(settings.reset_delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "board": { "width": 640, "height": 600 }, "seed": 7 }"#)
            .unwrap();
        assert_eq!(settings.board.width, 640.0);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.tuning, Tuning::default());
        assert_eq!(settings.tick_interval_ms, REFRESH_RATE_MS);
    }

    #[test]
    fn test_json_roundtrip() {
        let mut settings = Settings::default();
        settings.tuning.max_wall_height = Some(80.0);
        settings.seed = Some(42);
        let parsed = Settings::from_json(&settings.to_json().unwrap()).unwrap();
        assert_eq!(parsed.tuning, settings.tuning);
        assert_eq!(parsed.seed, Some(42));
    }

    #[test]
    fn test_rejects_closed_gap() {
        let mut settings = Settings::default();
        settings.tuning.max_wall_height = Some(240.0);
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::GapClosed { .. })
        ));
    }

    #[test]
    fn test_rejects_inverted_wall_bounds() {
        // 320 / 8 = 40 is below the default min of 50
        let mut settings = Settings::default();
        settings.board.height = 320.0;
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::WallBounds { .. })
        ));
    }

    #[test]
    fn test_rejects_skipping_scroll_speed() {
        let mut settings = Settings::default();
        settings.tuning.wall_speed = 15.0;
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::WallSpeed { .. })
        ));
    }

    #[test]
    fn test_rejects_zero_timing() {
        let mut settings = Settings::default();
        settings.tick_interval_ms = 0;
        assert!(matches!(settings.validate(), Err(SettingsError::Zero(_))));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(SettingsError::Parse(_))
        ));
    }
}
