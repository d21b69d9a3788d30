use crate::config::PlayersConfig;
use crate::game::{Cell, GameOutcome, GameSession, Player, COLS, ROWS};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Host-side decorations drawn over the session's board.
#[derive(Debug, Default)]
pub struct BoardOverlay<'a> {
    /// Piece in flight: `(row, col, player)`
    pub falling: Option<(usize, usize, Player)>,
    /// Landing cell hidden until the falling piece reaches it
    pub hidden: Option<(usize, usize)>,
    pub highlight: &'a [(usize, usize)],
}

pub fn render(
    frame: &mut Frame,
    session: &GameSession,
    names: &PlayersConfig,
    selected_column: usize,
    message: &Option<String>,
    overlay: &BoardOverlay<'_>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Min(11),    // Board
            Constraint::Length(3),  // Message
            Constraint::Length(3),  // Controls
        ])
        .split(frame.area());

    render_header(frame, session, names, chunks[0]);
    render_board(frame, session, selected_column, overlay, chunks[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn player_color(player: Player) -> Color {
    match player {
        Player::Red => Color::Red,
        Player::Yellow => Color::Yellow,
    }
}

pub fn player_name(names: &PlayersConfig, player: Player) -> &str {
    match player {
        Player::Red => &names.red_name,
        Player::Yellow => &names.yellow_name,
    }
}

fn render_header(frame: &mut Frame, session: &GameSession, names: &PlayersConfig, area: Rect) {
    let (status, color) = match session.outcome() {
        Some(GameOutcome::Winner(player)) => (
            format!("Game Over  |  {} wins", player_name(names, player)),
            player_color(player),
        ),
        Some(GameOutcome::Draw) => ("Game Over  |  Draw".to_string(), Color::White),
        None => {
            let player = session.current_player();
            (
                format!("Current Player: {}", player_name(names, player)),
                player_color(player),
            )
        }
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Connect Four"),
        );

    frame.render_widget(header, area);
}

fn cell_span(cell: Cell, highlighted: bool) -> Span<'static> {
    let (symbol, color) = match cell.owner() {
        None => (" . ", Color::DarkGray),
        Some(player) => (" ● ", player_color(player)),
    };
    let mut style = Style::default().fg(color);
    if highlighted {
        style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
    }
    Span::styled(symbol, style)
}

fn render_board(
    frame: &mut Frame,
    session: &GameSession,
    selected_column: usize,
    overlay: &BoardOverlay<'_>,
    area: Rect,
) {
    let mut lines = Vec::new();

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw("   ")]; // Padding (3 chars to match "  ║")
    for col in 0..COLS {
        if col == selected_column {
            col_line.push(Span::styled(
                format!(" {} ", col + 1),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(format!(" {} ", col + 1)));
        }
    }
    col_line.push(Span::raw("  ")); // Suffix padding to match " ║"
    lines.push(Line::from(col_line));

    lines.push(Line::from("  ╔══════════════════════╗"));

    for row in 0..ROWS {
        let mut row_spans = vec![Span::raw("  ║")];

        for col in 0..COLS {
            let mut cell = session.cell_at(row, col).unwrap_or_default();
            if overlay.hidden == Some((row, col)) {
                cell = Cell::Empty;
            }
            if let Some((r, c, player)) = overlay.falling {
                if (r, c) == (row, col) {
                    cell = player.to_cell();
                }
            }
            let highlighted = overlay.highlight.contains(&(row, col));
            row_spans.push(cell_span(cell, highlighted));
        }

        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from("  ╚══════════════════════╝"));

    // Selection indicator
    let mut indicator_line = vec![Span::raw("   ")];
    for col in 0..COLS {
        if col == selected_column {
            indicator_line.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
        } else {
            indicator_line.push(Span::raw("   "));
        }
    }
    indicator_line.push(Span::raw("  "));
    lines.push(Line::from(indicator_line));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let line = Line::from("←/→ or 1-7: Select  |  Enter: Drop  |  R: Restart  |  Q: Quit");

    let controls = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Controls"),
        );

    frame.render_widget(controls, area);
}
