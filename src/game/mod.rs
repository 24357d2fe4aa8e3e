//! Core game logic for Snake
//!
//! Everything here is free of terminal I/O: the same `GameState` drives the
//! interactive front end, the autopilot and the headless simulator.

pub mod config;
pub mod grid;
pub mod heading;
pub mod state;

pub use config::GameConfig;
pub use grid::{Boundary, Cell, Grid};
pub use heading::Heading;
pub use state::{Collision, GameState, Status, StepOutcome};
