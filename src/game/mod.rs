//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! A driver feeds it elapsed time and commands and reads back a [`Snapshot`].

pub mod action;
pub mod config;
pub mod food;
pub mod grid;
pub mod session;
pub mod snake;

// Re-export commonly used types
pub use action::{Command, Direction};
pub use config::{ConfigError, GameConfig, MAX_GRID_CELLS};
pub use food::Food;
pub use grid::{Grid, Position};
pub use session::{GameSession, SessionState, Snapshot};
pub use snake::{MoveOutcome, Snake};
