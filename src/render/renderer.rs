use std::collections::HashSet;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::game::{Grid, Position, SessionState, Snapshot};
use crate::metrics::GameMetrics;

/// Terminal columns per grid cell
const CELL_WIDTH: usize = 2;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &Snapshot, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(snapshot, metrics);
        frame.render_widget(stats, chunks[0]);

        // The world stays visible under the overlays
        let game_area = chunks[1];
        frame.render_widget(self.render_grid(game_area, snapshot), game_area);

        let overlay = match snapshot.state {
            SessionState::Playing => None,
            SessionState::Paused => Some(self.render_paused()),
            SessionState::GameOver => Some(self.render_game_over(snapshot)),
        };
        if let Some(overlay) = overlay {
            let popup = centered_rect(36, 9, game_area);
            frame.render_widget(Clear, popup);
            frame.render_widget(overlay, popup);
        }

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, area: Rect, snapshot: &Snapshot) -> Paragraph<'_> {
        let head = snapshot.snake_segments.first().copied();
        let body: HashSet<Position> = snapshot.snake_segments.iter().copied().collect();
        let dead = snapshot.state == SessionState::GameOver;

        let grid = Grid::new(snapshot.grid_width, snapshot.grid_height);
        let viewport = Viewport::fit(area, snapshot);
        let mut lines = Vec::with_capacity(viewport.rows);

        for row in 0..viewport.rows {
            let mut spans = Vec::with_capacity(viewport.columns);

            for column in 0..viewport.columns {
                let pos = viewport.position(&grid, column, row);

                let cell = if Some(pos) == head {
                    let color = if dead { Color::Red } else { Color::Cyan };
                    Span::styled(
                        "■ ",
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    )
                } else if body.contains(&pos) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if pos == snapshot.food {
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

    fn render_stats(&self, snapshot: &Snapshot, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(snapshot.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Length: ", label),
            Span::styled(snapshot.snake_segments.len().to_string(), value),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(format!("{}/s", snapshot.moves_per_second), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_paused(&self) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "PAUSED",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press any key to resume",
                Style::default().fg(Color::Gray),
            )),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
    }

    fn render_game_over(&self, snapshot: &Snapshot) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "SPACE",
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

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::raw(" to pause | "),
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

/// The part of the board that fits inside the grid block.
///
/// Boards larger than the screen are shown as a window centered on the head;
/// the board wraps, so the window wraps with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Viewport {
    origin: Position,
    columns: usize,
    rows: usize,
}

impl Viewport {
    fn fit(area: Rect, snapshot: &Snapshot) -> Self {
        // One cell of border on every side
        let columns =
            (usize::from(area.width.saturating_sub(2)) / CELL_WIDTH).min(snapshot.grid_width);
        let rows = usize::from(area.height.saturating_sub(2)).min(snapshot.grid_height);
        let head = snapshot
            .snake_segments
            .first()
            .copied()
            .unwrap_or(Position::new(0, 0));

        let start = |visible: usize, extent: usize, at: i32| {
            if visible >= extent {
                0
            } else {
                at - (visible / 2) as i32
            }
        };

        Self {
            origin: Position::new(
                start(columns, snapshot.grid_width, head.x),
                start(rows, snapshot.grid_height, head.y),
            ),
            columns,
            rows,
        }
    }

    fn position(&self, grid: &Grid, column: usize, row: usize) -> Position {
        grid.wrap(self.origin.moved_by(column as i32, row as i32))
    }
}

/// A `width` x `height` rect centered in `area`, shrunk to fit if needed
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Command, GameConfig, GameSession};
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(snapshot: &Snapshot) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let renderer = Renderer::new();
        let metrics = GameMetrics::new();

        terminal
            .draw(|frame| renderer.render(frame, snapshot, &metrics))
            .unwrap();

        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn session() -> GameSession {
        GameSession::with_seed(GameConfig::small(), 5).unwrap()
    }

    #[test]
    fn test_playing_has_no_overlay() {
        let screen = draw(&session().snapshot());
        assert!(screen.contains("Score: 0"));
        assert!(screen.contains("■"));
        assert!(!screen.contains("PAUSED"));
        assert!(!screen.contains("GAME OVER"));
    }

    #[test]
    fn test_paused_overlay() {
        let mut session = session();
        session.handle_command(Command::TogglePause);

        let screen = draw(&session.snapshot());
        assert!(screen.contains("PAUSED"));
        assert!(screen.contains("Press any key to resume"));
    }

    #[test]
    fn test_game_over_overlay() {
        let mut snapshot = session().snapshot();
        snapshot.state = SessionState::GameOver;
        snapshot.score = 70;

        let screen = draw(&snapshot);
        assert!(screen.contains("GAME OVER"));
        assert!(screen.contains("Final Score: 70"));
    }

    #[test]
    fn test_default_board_visible_on_small_terminal() {
        let snapshot = GameSession::with_seed(GameConfig::default(), 5)
            .unwrap()
            .snapshot();

        let screen = draw(&snapshot);
        assert!(screen.contains("■"));
        assert_eq!(screen.matches("□").count(), 3);
    }

    #[test]
    fn test_viewport_shows_whole_board_when_it_fits() {
        let snapshot = session().snapshot();
        let viewport = Viewport::fit(Rect::new(0, 0, 80, 18), &snapshot);

        assert_eq!(
            viewport,
            Viewport {
                origin: Position::new(0, 0),
                columns: 10,
                rows: 10,
            }
        );
    }

    #[test]
    fn test_viewport_centers_on_head() {
        let snapshot = GameSession::with_seed(GameConfig::default(), 5)
            .unwrap()
            .snapshot();
        let viewport = Viewport::fit(Rect::new(0, 0, 40, 12), &snapshot);

        // 19 columns by 10 rows around the head at (25, 25)
        assert_eq!(viewport.columns, 19);
        assert_eq!(viewport.rows, 10);
        assert_eq!(viewport.origin, Position::new(16, 20));
    }

    #[test]
    fn test_viewport_wraps_past_board_edge() {
        let mut snapshot = GameSession::with_seed(GameConfig::default(), 5)
            .unwrap()
            .snapshot();
        snapshot.snake_segments = vec![Position::new(0, 0)];
        let grid = Grid::new(snapshot.grid_width, snapshot.grid_height);

        let viewport = Viewport::fit(Rect::new(0, 0, 40, 12), &snapshot);

        assert_eq!(viewport.position(&grid, 0, 0), Position::new(41, 45));
        assert_eq!(viewport.position(&grid, 9, 5), Position::new(0, 0));
        assert_eq!(viewport.position(&grid, 18, 9), Position::new(9, 4));
    }

    #[test]
    fn test_centered_rect_clamps() {
        let area = Rect::new(0, 0, 20, 5);
        let rect = centered_rect(36, 9, area);
        assert_eq!(rect, area);

        let rect = centered_rect(10, 3, Rect::new(2, 2, 20, 7));
        assert_eq!(rect, Rect::new(7, 4, 10, 3));
    }
}
