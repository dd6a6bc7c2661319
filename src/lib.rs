//! Torus Snake - Snake on a wrap-around grid
//!
//! This library provides:
//! - Core game logic: grid, snake, food and the session state machine (game module)
//! - Keyboard mapping (input module)
//! - TUI rendering of session snapshots (render module)
//! - The interactive frame loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
