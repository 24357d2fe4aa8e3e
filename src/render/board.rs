use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Cell, Collision, GameState, Heading, Status};
use crate::metrics::SessionStats;

const KEY_STYLE: Style = Style::new().fg(Color::Cyan);
const LABEL_STYLE: Style = Style::new().fg(Color::Yellow);
const VALUE_STYLE: Style = Style::new().fg(Color::White);

/// Draws the board plus a header and footer around it
pub struct Renderer {
    title: String,
    controls: Vec<(&'static str, &'static str)>,
}

impl Renderer {
    /// `controls` pairs a key label with what it does, for the footer
    pub fn new(title: impl Into<String>, controls: Vec<(&'static str, &'static str)>) -> Self {
        Self {
            title: title.into(),
            controls,
        }
    }

    /// Draw one frame; `note` is an extra header entry such as the speed
    pub fn render(
        &self,
        frame: &mut Frame,
        state: &GameState,
        stats: &SessionStats,
        paused: bool,
        note: Option<&str>,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(state, stats, note), chunks[0]);

        let board_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        let board = match state.status() {
            Status::Running if paused => self.render_paused(),
            Status::Running => self.render_board(state),
            status => self.render_game_over(state, status),
        };
        frame.render_widget(board, board_area);

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_board(&self, state: &GameState) -> Paragraph<'_> {
        let grid = state.grid();
        let head = state.head();
        let food = state.food();

        let lines: Vec<Line> = (0..grid.height)
            .map(|y| {
                let spans: Vec<Span> = (0..grid.width)
                    .map(|x| {
                        let cell = Cell::new(x as i32, y as i32);
                        if cell == head {
                            Span::styled(
                                head_glyph(state.heading()),
                                Style::default()
                                    .fg(Color::Cyan)
                                    .add_modifier(Modifier::BOLD),
                            )
                        } else if state.occupies(cell) {
                            Span::styled("□ ", Style::default().fg(Color::Green))
                        } else if food == Some(cell) {
                            Span::styled(
                                "● ",
                                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                            )
                        } else {
                            Span::styled(". ", Style::default().fg(Color::DarkGray))
                        }
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(format!(" {} ", self.title)),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(
        &self,
        state: &GameState,
        stats: &SessionStats,
        note: Option<&str>,
    ) -> Paragraph<'_> {
        let mut spans = Vec::new();
        let mut entry = |label: &str, value: String| {
            if !spans.is_empty() {
                spans.push(Span::raw("    "));
            }
            spans.push(Span::styled(format!("{label}: "), LABEL_STYLE));
            spans.push(Span::styled(value, VALUE_STYLE));
        };

        entry("Score", state.score().to_string());
        entry("Length", state.len().to_string());
        entry("Ticks", state.ticks().to_string());
        entry("Time", stats.format_time());
        entry("Best", stats.high_score.to_string());
        if let Some(note) = note {
            entry("Speed", note.to_string());
        }

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }

    fn render_paused(&self) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "PAUSED",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled("Space", KEY_STYLE.add_modifier(Modifier::BOLD)),
                Span::styled(" to resume", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
    }

    fn render_game_over(&self, state: &GameState, status: Status) -> Paragraph<'_> {
        let (headline, colour) = match status {
            Status::Won => ("BOARD CLEARED", Color::Green),
            Status::Crashed(Collision::Wall) => ("GAME OVER - hit the wall", Color::Red),
            Status::Crashed(Collision::SelfBite) => ("GAME OVER - bit yourself", Color::Red),
            Status::Running => ("", Color::Reset),
        };

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                headline,
                Style::default().fg(colour).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", LABEL_STYLE),
                Span::styled(
                    state.score().to_string(),
                    VALUE_STYLE.add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                Span::styled("Length: ", LABEL_STYLE),
                Span::styled(state.len().to_string(), VALUE_STYLE),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colour)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let mut spans = Vec::new();
        for (i, (key, action)) in self.controls.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" | "));
            }
            spans.push(Span::styled(*key, KEY_STYLE));
            spans.push(Span::raw(format!(" {action}")));
        }

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }
}

fn head_glyph(heading: Heading) -> &'static str {
    match heading {
        Heading::Up => "▲ ",
        Heading::Down => "▼ ",
        Heading::Left => "◀ ",
        Heading::Right => "▶ ",
    }
}
