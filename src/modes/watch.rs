//! Watch the autopilot play
//!
//! # Controls
//!
//! - Space: Pause/unpause
//! - R: Restart the current game
//! - +/-: Speed up / slow down
//! - Q/Esc: Quit

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::{Interval, interval};
use tracing::info;

use super::terminal::{self, Tui};
use super::{FRAME_INTERVAL, record_step};
use crate::game::{GameConfig, GameState};
use crate::input::{KeyAction, map_key};
use crate::metrics::SessionStats;
use crate::pilot::{GreedyPilot, Pilot};
use crate::render::Renderer;

/// Ticks to linger on a finished game before starting the next one
const RESTART_DELAY_TICKS: u32 = 10;

/// Playback speed settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speed {
    /// 4 Hz
    Slow,
    /// 10 Hz, the pace of the human game
    Normal,
    /// 20 Hz
    Fast,
    /// About 60 Hz
    VeryFast,
}

impl Speed {
    pub fn tick_interval(self) -> Duration {
        match self {
            Self::Slow => Duration::from_millis(250),
            Self::Normal => Duration::from_millis(100),
            Self::Fast => Duration::from_millis(50),
            Self::VeryFast => Duration::from_millis(16),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Slow => "Slow",
            Self::Normal => "Normal",
            Self::Fast => "Fast",
            Self::VeryFast => "Very Fast",
        }
    }

    pub fn faster(self) -> Self {
        match self {
            Self::Slow => Self::Normal,
            Self::Normal => Self::Fast,
            Self::Fast | Self::VeryFast => Self::VeryFast,
        }
    }

    pub fn slower(self) -> Self {
        match self {
            Self::Slow | Self::Normal => Self::Slow,
            Self::Fast => Self::Normal,
            Self::VeryFast => Self::Fast,
        }
    }
}

pub struct WatchMode<P: Pilot = GreedyPilot> {
    state: GameState,
    pilot: P,
    stats: SessionStats,
    renderer: Renderer,
    speed: Speed,
    paused: bool,
    should_quit: bool,
    /// Ticks spent on the game-over screen so far
    idle_ticks: u32,
}

impl WatchMode<GreedyPilot> {
    pub fn new(config: &GameConfig) -> Result<Self> {
        Self::with_pilot(config, GreedyPilot::new())
    }
}

impl<P: Pilot> WatchMode<P> {
    pub fn with_pilot(config: &GameConfig, pilot: P) -> Result<Self> {
        let state = GameState::new(config).context("Invalid game configuration")?;

        let mut stats = SessionStats::new();
        stats.on_game_start(state.len());

        Ok(Self {
            state,
            pilot,
            stats,
            renderer: Renderer::new(
                "Snake - autopilot",
                vec![
                    ("Space", "pause"),
                    ("+/-", "speed"),
                    ("R", "restart"),
                    ("Q", "quit"),
                ],
            ),
            speed: Speed::Normal,
            paused: false,
            should_quit: false,
            idle_ticks: 0,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = terminal::enter()?;
        let result = self.run_watch_loop(&mut terminal).await;
        terminal::leave(&mut terminal)?;
        result
    }

    async fn run_watch_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick_timer = interval(self.speed.tick_interval());
        let mut render_timer = interval(FRAME_INTERVAL);

        info!("watch mode started");

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(Event::Key(key))) = maybe_event {
                        if key.kind == KeyEventKind::Press {
                            self.handle_action(map_key(key), &mut tick_timer);
                        }
                    }
                }

                _ = tick_timer.tick() => {
                    self.on_tick();
                }

                _ = render_timer.tick() => {
                    self.stats.update();
                    terminal.draw(|frame| {
                        self.renderer.render(
                            frame,
                            &self.state,
                            &self.stats,
                            self.paused,
                            Some(self.speed.as_str()),
                        );
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_action(&mut self, action: KeyAction, tick_timer: &mut Interval) {
        match action {
            KeyAction::Pause => self.paused = !self.paused,
            KeyAction::Restart => self.restart(),
            KeyAction::Faster => self.change_speed(self.speed.faster(), tick_timer),
            KeyAction::Slower => self.change_speed(self.speed.slower(), tick_timer),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::Turn(_) | KeyAction::None => {}
        }
    }

    fn change_speed(&mut self, speed: Speed, tick_timer: &mut Interval) {
        self.speed = speed;
        *tick_timer = interval(speed.tick_interval());
    }

    fn restart(&mut self) {
        self.state.restart();
        self.stats.on_game_start(self.state.len());
        self.idle_ticks = 0;
    }

    fn on_tick(&mut self) {
        if self.paused {
            return;
        }

        if !self.state.is_running() {
            self.idle_ticks += 1;
            if self.idle_ticks >= RESTART_DELAY_TICKS {
                self.restart();
            }
            return;
        }

        if let Some(heading) = self.pilot.choose(&self.state) {
            self.state.turn(heading);
        }
        let outcome = self.state.step();
        record_step(&mut self.stats, &self.state, &outcome);
    }
}
