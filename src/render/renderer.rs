use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{CollisionType, EndReason, GameState, GameStatus, Grid, Position};
use crate::metrics::GameMetrics;

const BANNER_WIDTH: u16 = 36;
const BANNER_HEIGHT: u16 = 7;
/// Header and footer rows around the board
const CHROME_HEIGHT: u16 = 6;

/// Colour of body segment `index` at animation `phase`.
///
/// Each channel runs its own sine wave so the colours drift along the body.
pub fn segment_color(phase: f32, index: usize) -> Color {
    let i = index as f32;
    let channel = |offset: f32, rate: f32| -> u8 {
        let level = 0.5 + 0.5 * (phase + i * rate + offset).sin();
        (level * 255.0).round().clamp(0.0, 255.0) as u8
    };
    Color::Rgb(channel(0.0, 0.3), channel(2.0, 0.5), channel(4.0, 0.7))
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Terminal size needed to show the whole board: two columns per cell plus borders
    pub fn required_size(grid: Grid) -> (u16, u16) {
        let width = grid.width.saturating_mul(2).saturating_add(2);
        let height = grid.height.saturating_add(2);
        (
            u16::try_from(width).unwrap_or(u16::MAX),
            u16::try_from(height).unwrap_or(u16::MAX).saturating_add(CHROME_HEIGHT),
        )
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let area = frame.area();
        let (needed_width, needed_height) = Self::required_size(state.grid);
        if area.width < needed_width || area.height < needed_height {
            let warning = self.render_too_small(area, needed_width, needed_height);
            frame.render_widget(warning, area);
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(area);

        let stats = self.render_stats(state, metrics);
        frame.render_widget(stats, chunks[0]);

        let game_area = chunks[1];
        let grid = self.render_grid(state);
        frame.render_widget(grid, game_area);

        if let GameStatus::GameOver(reason) = state.status {
            let banner_area = Self::centered(game_area, BANNER_WIDTH, BANNER_HEIGHT);
            frame.render_widget(Clear, banner_area);
            frame.render_widget(self.render_game_over(state, reason), banner_area);
        }

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    fn centered(area: Rect, width: u16, height: u16) -> Rect {
        let [row] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);
        let [cell] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(row);
        cell
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let mut lines = Vec::with_capacity(state.grid.height);
        let head = state.snake.head();

        for y in 0..state.grid.height_i32() {
            let mut spans = Vec::with_capacity(state.grid.width);

            for x in 0..state.grid.width_i32() {
                let pos = Position::new(x, y);

                let cell = if pos == head {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if let Some(index) = state.snake.body.iter().position(|&p| p == pos) {
                    Span::styled("■ ", Style::default().fg(segment_color(state.phase, index)))
                } else if state.is_wall(pos) {
                    Span::styled("▓▓", Style::default().fg(Color::Gray))
                } else if pos == state.apple {
                    Span::styled(
                        "● ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(state.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Level: ", label),
            Span::styled(state.level.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.best_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, state: &GameState, reason: EndReason) -> Paragraph<'_> {
        let text = vec![
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(Span::styled(
                Self::describe(reason),
                Style::default().fg(Color::Gray),
            )),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
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
                Span::styled(" to restart", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn describe(reason: EndReason) -> &'static str {
        match reason {
            EndReason::Collision(CollisionType::Boundary) => "You left the board",
            EndReason::Collision(CollisionType::Wall) => "You hit a wall",
            EndReason::Collision(CollisionType::SelfCollision) => "You bit yourself",
            EndReason::BoardFull => "No room left for apples",
        }
    }

    fn render_too_small(&self, area: Rect, width: u16, height: u16) -> Paragraph<'_> {
        let text = vec![
            Line::from(Span::styled(
                "Terminal too small",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("need {width}x{height}, have {}x{}", area.width, area.height)),
            Line::from("Resize the window or pass a smaller --width/--height"),
        ];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
