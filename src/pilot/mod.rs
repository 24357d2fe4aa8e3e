//! Automatic players
//!
//! A pilot looks at the board before every tick and decides which way the
//! snake should turn. The watch and simulate modes drive a `GameState` with
//! one.

pub mod greedy;

pub use greedy::GreedyPilot;

use crate::game::{GameState, Heading};

pub trait Pilot {
    /// Heading to request for the next tick, or `None` to carry on unchanged
    fn choose(&mut self, state: &GameState) -> Option<Heading>;
}
