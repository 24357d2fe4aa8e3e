use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use gridsnake::game::{Boundary, GameConfig};
use gridsnake::logging::{self, LogTarget};
use gridsnake::modes::{PlayMode, SimulateMode, WatchMode};

#[derive(Parser)]
#[command(name = "gridsnake")]
#[command(version, about = "Snake on a grid, in your terminal")]
struct Cli {
    /// What to run
    #[arg(long, value_enum, default_value = "play")]
    mode: Mode,

    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Wrap around the edges instead of dying on the walls
    #[arg(long)]
    wrap: bool,

    /// Milliseconds per game tick in play mode
    #[arg(long, default_value = "100", value_parser = clap::value_parser!(u64).range(1..))]
    tick_ms: u64,

    /// Number of games to simulate
    #[arg(long, default_value = "100")]
    games: usize,

    /// Tick limit per simulated game
    #[arg(long, default_value = "10000")]
    max_ticks: u64,

    /// Write logs to this file (play and watch modes log nowhere otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log filter, e.g. "info" or "gridsnake=debug"
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Play,
    /// Watch the autopilot play
    Watch,
    /// Run the autopilot headless and print a JSON report
    Simulate,
}

impl Cli {
    /// Defaults, then the config file, then command-line flags
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.wrap {
            config.boundary = Boundary::Wrap;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let target = match (&cli.log_file, cli.mode) {
        (Some(path), _) => LogTarget::File(path),
        (None, Mode::Simulate) => LogTarget::Stderr,
        (None, _) => LogTarget::Off,
    };
    logging::init(target, &cli.log_level)?;

    let config = cli.game_config()?;

    match cli.mode {
        Mode::Play => {
            let mut play_mode = PlayMode::new(&config, Duration::from_millis(cli.tick_ms))?;
            play_mode.run().await?;
        }
        Mode::Watch => {
            let mut watch_mode = WatchMode::new(&config)?;
            watch_mode.run().await?;
        }
        Mode::Simulate => {
            let report = SimulateMode::new(config, cli.games, cli.max_ticks).run()?;
            let json =
                serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
            println!("{json}");
        }
    }

    Ok(())
}
