use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest board a session accepts; food placement scans every cell
pub const MAX_GRID_CELLS: usize = 1 << 20;

/// Configuration for the game
///
/// Every value is fixed once a session is built; there is no runtime
/// reconfiguration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Points awarded per food eaten
    pub score_per_food: u32,
    /// The snake speeds up each time the score crosses a multiple of this
    pub speedup_every: u32,
    /// Starting speed in moves per second
    pub initial_moves_per_second: u32,
    /// Speed cap in moves per second
    pub max_moves_per_second: u32,
    /// Render/input frame rate of the driving loop
    pub frames_per_second: u32,
}

/// Reasons a configuration cannot start a session
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },

    #[error("grid {width}x{height} exceeds the limit of {max_cells} cells")]
    GridTooLarge {
        width: usize,
        height: usize,
        max_cells: usize,
    },

    #[error("initial snake length must be at least 1")]
    EmptySnake,

    #[error("initial snake length {length} does not fit in a grid {width} cells wide")]
    SnakeTooLong { length: usize, width: usize },

    #[error("speeds must be positive (initial {initial}, max {max})")]
    ZeroSpeed { initial: u32, max: u32 },

    #[error("initial speed {initial} exceeds max speed {max}")]
    SpeedAboveMax { initial: u32, max: u32 },

    #[error("speed-up threshold must be positive")]
    ZeroSpeedupThreshold,

    #[error("frame rate must be positive")]
    ZeroFrameRate,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 50,
            grid_height: 50,
            initial_snake_length: 4,
            score_per_food: 10,
            speedup_every: 50,
            initial_moves_per_second: 8,
            max_moves_per_second: 15,
            frames_per_second: 60,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Check the invariants the simulation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        let cells = self.grid_width.checked_mul(self.grid_height);
        if cells.is_none_or(|cells| cells > MAX_GRID_CELLS) {
            return Err(ConfigError::GridTooLarge {
                width: self.grid_width,
                height: self.grid_height,
                max_cells: MAX_GRID_CELLS,
            });
        }
        if self.initial_snake_length == 0 {
            return Err(ConfigError::EmptySnake);
        }
        // The starting body is laid out along one row
        if self.initial_snake_length > self.grid_width {
            return Err(ConfigError::SnakeTooLong {
                length: self.initial_snake_length,
                width: self.grid_width,
            });
        }
        if self.initial_moves_per_second == 0 || self.max_moves_per_second == 0 {
            return Err(ConfigError::ZeroSpeed {
                initial: self.initial_moves_per_second,
                max: self.max_moves_per_second,
            });
        }
        if self.initial_moves_per_second > self.max_moves_per_second {
            return Err(ConfigError::SpeedAboveMax {
                initial: self.initial_moves_per_second,
                max: self.max_moves_per_second,
            });
        }
        if self.speedup_every == 0 {
            return Err(ConfigError::ZeroSpeedupThreshold);
        }
        if self.frames_per_second == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        Ok(())
    }
}
