use crate::game::{column_letter, Board, Cell, GameOutcome, GameState, Player};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(
    frame: &mut Frame,
    game_state: &GameState,
    selected_column: usize,
    message: &Option<String>,
    game_mode: &str,
) {
    let board_height = game_state.board().rows() as u16 + 4;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),            // Header
            Constraint::Min(board_height),    // Board
            Constraint::Length(3),            // Message
            Constraint::Length(4),            // Controls
        ])
        .split(frame.area());

    render_header(frame, game_state, game_mode, chunks[0]);
    render_board(frame, game_state.board(), selected_column, chunks[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn player_color(player: Player) -> Color {
    match player {
        Player::X => Color::Red,
        Player::O => Color::Yellow,
    }
}

fn render_header(frame: &mut Frame, game_state: &GameState, game_mode: &str, area: Rect) {
    let current_player = game_state.current_player();
    let color = player_color(current_player);

    let status = match game_state.outcome() {
        Some(GameOutcome::Winner(p)) => format!("{} wins  |  {}", p.name(), game_mode),
        Some(GameOutcome::Draw) => format!("Draw  |  {}", game_mode),
        None => format!("To move: {}  |  {}", current_player.name(), game_mode),
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Irregular Connect Four"),
        );

    frame.render_widget(header, area);
}

fn cell_span(cell: Cell) -> Span<'static> {
    let (symbol, color) = match cell {
        Cell::Empty => (" . ", Color::DarkGray),
        Cell::Dead => ("   ", Color::Reset),
        Cell::DontCare => (" : ", Color::Cyan),
        Cell::Piece(p) => (" ● ", player_color(p)),
        Cell::DontCarePiece(p) => (" ◍ ", player_color(p)),
    };
    Span::styled(symbol, Style::default().fg(color))
}

fn render_board(frame: &mut Frame, board: &Board, selected_column: usize, area: Rect) {
    let cols = board.cols();
    let inner_width = cols * 3 + 2;
    let mut lines = Vec::new();

    // Letter and indicator lines share the row margin so centering keeps them aligned
    let margin = "    ";

    // Column letters with selection indicator
    let mut col_line = vec![Span::raw(margin)];
    for col in 0..cols {
        let label = format!(" {} ", column_letter(col));
        if col == selected_column {
            col_line.push(Span::styled(
                label,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(label));
        }
    }
    col_line.push(Span::raw("  "));
    lines.push(Line::from(col_line));

    lines.push(Line::from(format!("  ╔{}╗", "═".repeat(inner_width))));

    for row in 0..board.rows() {
        let mut row_spans = vec![Span::raw("  ║ ")];
        for col in 0..cols {
            row_spans.push(cell_span(board.get(row, col)));
        }
        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from(format!("  ╚{}╝", "═".repeat(inner_width))));

    let mut indicator_line = vec![Span::raw(margin)];
    for col in 0..cols {
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
    let line1 = Line::from("←/→ or A-K: Select  |  Enter: Drop  |  R: Restart  |  Q: Quit");
    let line2 = Line::from(vec![
        Span::styled("●", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        Span::raw(" AI (X)   "),
        Span::styled("●", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::raw(" You (O)   "),
        Span::styled(":", Style::default().fg(Color::Cyan)),
        Span::raw(" don't-care cell"),
    ]);

    let controls = Paragraph::new(vec![line1, line2])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::BoardLayout;
    use ratatui::{backend::TestBackend, Terminal};

    fn find(buffer: &ratatui::buffer::Buffer, symbol: &str) -> (u16, u16) {
        let width = buffer.area.width;
        let idx = buffer
            .content()
            .iter()
            .position(|c| c.symbol() == symbol)
            .unwrap();
        (idx as u16 % width, idx as u16 / width)
    }

    fn symbol_at(buffer: &ratatui::buffer::Buffer, x: u16, y: u16) -> String {
        let width = buffer.area.width;
        buffer.content()[(y * width + x) as usize].symbol().to_string()
    }

    #[test]
    fn test_letters_and_indicator_line_up_with_cells() {
        let layout = BoardLayout::parse("7 8 6 7 8 9 8", "A3 B1").unwrap();
        let mut state = GameState::new(&layout, Player::X);
        state.apply_move_mut(2).unwrap();

        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal
            .draw(|f| render(f, &state, 2, &None, "test"))
            .unwrap();
        let buffer = terminal.backend().buffer();

        let (left, top) = find(buffer, "╔");
        let (_, bottom) = find(buffer, "╚");
        // Column C cell center: border, space, then two 3-wide cells
        let c_center = left + 2 + 3 * 2 + 1;

        assert_eq!(symbol_at(buffer, c_center, top - 1), "C");
        assert_eq!(symbol_at(buffer, c_center, bottom - 1), "●");
        assert_eq!(symbol_at(buffer, c_center, bottom + 1), "▲");
    }
}
