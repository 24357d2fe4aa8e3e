use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::interval;
use tracing::{debug, info};

use super::terminal::{self, Tui};
use super::{FRAME_INTERVAL, record_step};
use crate::game::{GameConfig, GameState};
use crate::input::{KeyAction, map_key};
use crate::metrics::SessionStats;
use crate::render::Renderer;

/// A human at the keyboard
pub struct PlayMode {
    state: GameState,
    stats: SessionStats,
    renderer: Renderer,
    tick_interval: Duration,
    paused: bool,
    should_quit: bool,
}

impl PlayMode {
    pub fn new(config: &GameConfig, tick_interval: Duration) -> Result<Self> {
        let state = GameState::new(config).context("Invalid game configuration")?;

        let mut stats = SessionStats::new();
        stats.on_game_start(state.len());

        Ok(Self {
            state,
            stats,
            renderer: Renderer::new(
                "Snake",
                vec![
                    ("↑↓←→/WASD", "move"),
                    ("Space", "pause"),
                    ("R", "restart"),
                    ("Q", "quit"),
                ],
            ),
            tick_interval,
            paused: false,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = terminal::enter()?;
        let result = self.run_game_loop(&mut terminal).await;
        terminal::leave(&mut terminal)?;
        result
    }

    async fn run_game_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick_timer = interval(self.tick_interval);
        let mut render_timer = interval(FRAME_INTERVAL);

        info!(tick_ms = self.tick_interval.as_millis() as u64, "play mode started");

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                _ = tick_timer.tick() => {
                    self.on_tick();
                }

                _ = render_timer.tick() => {
                    self.stats.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.stats, self.paused, None);
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

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind == KeyEventKind::Press {
                self.handle_action(map_key(key));
            }
        }
    }

    fn handle_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Turn(heading) => {
                if !self.paused && !self.state.turn(heading) {
                    debug!(?heading, "reversal ignored");
                }
            }
            KeyAction::Pause => {
                if self.state.is_running() {
                    self.paused = !self.paused;
                }
            }
            KeyAction::Restart => {
                self.state.restart();
                self.stats.on_game_start(self.state.len());
                self.paused = false;
            }
            KeyAction::Quit => self.should_quit = true,
            KeyAction::Faster | KeyAction::Slower | KeyAction::None => {}
        }
    }

    fn on_tick(&mut self) {
        if self.paused || !self.state.is_running() {
            return;
        }
        let outcome = self.state.step();
        record_step(&mut self.stats, &self.state, &outcome);
    }
}
