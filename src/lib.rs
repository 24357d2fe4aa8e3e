//! Gridsnake - Snake on a fixed grid, playable in the terminal
//!
//! This library provides:
//! - Core game logic (game module)
//! - A greedy autopilot (pilot module)
//! - TUI rendering and key mapping (render, input modules)
//! - Play, watch and headless simulation modes (modes module)

pub mod error;
pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod pilot;
pub mod render;

pub use error::GameError;
