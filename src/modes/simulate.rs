//! Headless runs of the autopilot
//!
//! Plays a batch of games without a terminal and summarises them. With a
//! fixed seed the report is reproducible, which makes it handy for checking
//! changes to the rules or the pilot.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::game::{Collision, GameConfig, GameState, Status};
use crate::pilot::{GreedyPilot, Pilot};

/// How a simulated game finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Ending {
    Crashed(Collision),
    Won,
    /// Still alive when the tick limit was reached
    TickLimit,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameReport {
    pub game: usize,
    pub score: u32,
    pub length: usize,
    pub ticks: u64,
    pub ending: Ending,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    pub grid_width: usize,
    pub grid_height: usize,
    pub seed: Option<u64>,
    pub games: Vec<GameReport>,
    pub mean_score: f64,
    pub best_score: u32,
    pub total_ticks: u64,
}

pub struct SimulateMode<P: Pilot = GreedyPilot> {
    config: GameConfig,
    pilot: P,
    games: usize,
    max_ticks: u64,
}

impl SimulateMode<GreedyPilot> {
    pub fn new(config: GameConfig, games: usize, max_ticks: u64) -> Self {
        Self::with_pilot(config, GreedyPilot::new(), games, max_ticks)
    }
}

impl<P: Pilot> SimulateMode<P> {
    pub fn with_pilot(config: GameConfig, pilot: P, games: usize, max_ticks: u64) -> Self {
        Self {
            config,
            pilot,
            games,
            max_ticks,
        }
    }

    /// Play every game and collect the report
    pub fn run(&mut self) -> Result<SimulationReport> {
        let mut state = GameState::new(&self.config).context("Invalid game configuration")?;
        let mut reports = Vec::with_capacity(self.games);

        info!(games = self.games, max_ticks = self.max_ticks, "simulation started");

        for game in 0..self.games {
            if game > 0 {
                state.restart();
            }
            let report = self.play_one(&mut state, game);
            debug!(?report, "game finished");
            reports.push(report);
        }

        let best_score = reports.iter().map(|r| r.score).max().unwrap_or(0);
        let total_ticks = reports.iter().map(|r| r.ticks).sum();
        let mean_score = if reports.is_empty() {
            0.0
        } else {
            reports.iter().map(|r| f64::from(r.score)).sum::<f64>() / reports.len() as f64
        };

        info!(mean_score, best_score, total_ticks, "simulation finished");

        Ok(SimulationReport {
            grid_width: self.config.grid_width,
            grid_height: self.config.grid_height,
            seed: self.config.seed,
            games: reports,
            mean_score,
            best_score,
            total_ticks,
        })
    }

    fn play_one(&mut self, state: &mut GameState, game: usize) -> GameReport {
        while state.is_running() && state.ticks() < self.max_ticks {
            if let Some(heading) = self.pilot.choose(state) {
                state.turn(heading);
            }
            state.step();
        }

        let ending = match state.status() {
            Status::Running => Ending::TickLimit,
            Status::Crashed(collision) => Ending::Crashed(collision),
            Status::Won => Ending::Won,
        };

        GameReport {
            game,
            score: state.score(),
            length: state.len(),
            ticks: state.ticks(),
            ending,
        }
    }
}
