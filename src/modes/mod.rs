pub mod play;
pub mod simulate;
mod terminal;
pub mod watch;

pub use play::PlayMode;
pub use simulate::{Ending, GameReport, SimulateMode, SimulationReport};
pub use watch::{Speed, WatchMode};

use std::time::Duration;

use crate::game::{GameState, StepOutcome};
use crate::metrics::SessionStats;

/// Redraw rate of the interactive modes (about 30 FPS)
pub(crate) const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Fold one tick's outcome into the session statistics
pub(crate) fn record_step(stats: &mut SessionStats, state: &GameState, outcome: &StepOutcome) {
    if outcome.ate_food {
        stats.on_food_eaten(state.len());
    }
    if !state.is_running() {
        stats.on_game_over(state.score());
    }
}
