use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{DistanceField, GameState, Position};
use crate::metrics::GameMetrics;

const HEADER_ROWS: u16 = 3;
const FOOTER_ROWS: u16 = 3;
const BORDER: u16 = 2;

/// Draws the board, the distance overlay and the session stats
pub struct Renderer {
    tile_size: u16,
}

impl Renderer {
    pub fn new(tile_size: u16) -> Self {
        Self {
            tile_size: tile_size.max(1),
        }
    }

    /// Smallest terminal, as `(columns, rows)`, that fits a whole board
    ///
    /// Saturates at `u16::MAX`, which no terminal can satisfy.
    pub fn required_size(board_size: usize, tile_size: u16) -> (u16, u16) {
        let board = u16::try_from(board_size).unwrap_or(u16::MAX);
        (
            board.saturating_mul(tile_size).saturating_add(BORDER),
            board.saturating_add(BORDER + HEADER_ROWS + FOOTER_ROWS),
        )
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        state: &GameState,
        field: &DistanceField,
        metrics: &GameMetrics,
        show_distances: bool,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_ROWS),
                Constraint::Min(0),
                Constraint::Length(FOOTER_ROWS),
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(state, metrics), chunks[0]);

        let (width, height) = Self::required_size(state.board_size, self.tile_size);
        let game_area = centered(
            chunks[1],
            width,
            height.saturating_sub(HEADER_ROWS + FOOTER_ROWS),
        );

        if state.is_alive() {
            frame.render_widget(self.render_grid(state, field, show_distances), game_area);
        } else {
            frame.render_widget(self.render_game_over(state, metrics), chunks[1]);
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_grid(
        &self,
        state: &GameState,
        field: &DistanceField,
        show_distances: bool,
    ) -> Paragraph<'_> {
        let max_distance = field.max_distance().unwrap_or(0);
        let mut lines = Vec::with_capacity(state.board_size);

        for y in 0..state.board_size {
            let spans: Vec<Span> = (0..state.board_size)
                .map(|x| {
                    let pos = Position::new(x as i32, y as i32);
                    self.render_cell(pos, state, field, show_distances, max_distance)
                })
                .collect();

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
        )
    }

    fn render_cell(
        &self,
        pos: Position,
        state: &GameState,
        field: &DistanceField,
        show_distances: bool,
        max_distance: u32,
    ) -> Span<'static> {
        let width = self.tile_size as usize;

        if pos == state.snake.head() {
            return Span::styled(
                format!("{:^width$}", "■"),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            );
        }

        if state.snake.occupies(pos) {
            return Span::styled(
                format!("{:^width$}", "□"),
                Style::default().fg(Color::Green),
            );
        }

        if pos == state.food {
            return Span::styled(
                format!("{:^width$}", "●"),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            );
        }

        match field.value_at(pos).filter(|_| show_distances) {
            Some(distance) => {
                let label = distance.to_string();
                let text = if label.len() <= width {
                    format!("{label:>width$}")
                } else {
                    format!("{:^width$}", "·")
                };
                Span::styled(text, distance_style(distance, max_distance))
            }
            None => Span::styled(
                format!("{:^width$}", "."),
                Style::default().fg(Color::DarkGray),
            ),
        }
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(
                state.score.to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Length: ", label),
            Span::styled(state.snake.len().to_string(), value),
            Span::raw("    "),
            Span::styled("Steps: ", label),
            Span::styled(state.steps.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.to_string(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let cause = state
            .collision
            .map(|collision| collision.describe())
            .unwrap_or("stopped");
        let gray = Style::default().fg(Color::Gray);

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(format!("The snake {cause}"), gray)),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled(
                format!(
                    "Games {}  Best {}  Longest {}  Walls {}  Bites {}",
                    metrics.games_played,
                    metrics.high_score,
                    metrics.longest_snake,
                    metrics.wall_deaths,
                    metrics.self_deaths
                ),
                gray,
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", gray),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", gray),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", gray),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("V", Style::default().fg(Color::Cyan)),
            Span::raw(" distances | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

/// Brighter numbers close to the food, fading with distance
fn distance_style(distance: u32, max_distance: u32) -> Style {
    let color = match distance * 4 / max_distance.max(1) {
        0 => Color::Yellow,
        1 => Color::LightBlue,
        2 => Color::Blue,
        _ => Color::DarkGray,
    };
    Style::default().fg(color)
}

/// A `width` x `height` rectangle centred in `area`, clipped to it
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
