//! Stateless rendering of the board, status line and announcements.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use robo_tictactoe::{Player, Position};

use crate::announcement::Announcement;
use crate::app::App;

const CELL_WIDTH: u16 = 7;
const CELL_HEIGHT: u16 = 3;

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(CELL_HEIGHT * 3),
            Constraint::Length(3), // Status
            Constraint::Length(1), // Help
        ])
        .split(frame.area());

    let title = Paragraph::new("Robo Tic-Tac-Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    draw_board(frame, chunks[1], app);

    let score = app.scoreboard();
    let status = Paragraph::new(app.status_message())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(format!(
            "You {} : {} Robot  (draws {})",
            score.human_wins, score.computer_wins, score.draws
        )));
    frame.render_widget(status, chunks[2]);

    let help = Paragraph::new("1-9 or arrows + Enter to move, q to quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[3]);

    if let Some(announcement) = app.announcement() {
        draw_announcement(frame, announcement);
    }
}

fn draw_board(frame: &mut Frame, area: Rect, app: &App) {
    let board_area = center_rect(area, CELL_WIDTH * 3, CELL_HEIGHT * 3);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(CELL_HEIGHT); 3])
        .split(board_area);

    for (row, row_area) in rows.iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(CELL_WIDTH); 3])
            .split(*row_area);
        for (col, cell_area) in cols.iter().enumerate() {
            if let Some(pos) = Position::from_row_col(row, col) {
                draw_cell(frame, *cell_area, app, pos);
            }
        }
    }
}

fn draw_cell(frame: &mut Frame, area: Rect, app: &App, pos: Position) {
    let mark = app.game().board().get(pos).map(|m| m.player());
    let (symbol, mut style) = match mark {
        None => (" ".to_string(), Style::default().fg(Color::DarkGray)),
        Some(player @ Player::Human) => (
            player.symbol().to_string(),
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Some(player @ Player::Computer) => (
            player.symbol().to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    };

    if app.is_board_disabled() {
        style = style.add_modifier(Modifier::DIM);
    } else if pos == app.cursor() && app.announcement().is_none() {
        style = style.bg(Color::White).fg(Color::Black);
    }

    let cell = Paragraph::new(Line::from(Span::styled(symbol, style)))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        );
    frame.render_widget(cell, area);
}

fn draw_announcement(frame: &mut Frame, announcement: &Announcement) {
    let area = center_rect(frame.area(), 46, 7);
    let text = vec![
        Line::from(Span::styled(
            announcement.message,
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("[ Enter: {} ]", announcement.button),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
    ];
    let dialog = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(announcement.title)
            .title_alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::BOLD)),
    );
    frame.render_widget(Clear, area);
    frame.render_widget(dialog, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
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
    use crossterm::event::KeyCode;
    use ratatui::{Terminal, backend::TestBackend};

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_renders_marks_and_score() {
        let mut app = App::new();
        app.handle_key(KeyCode::Char('1'));
        let screen = render(&app);
        assert!(screen.contains("Robo Tic-Tac-Toe"));
        assert!(screen.contains('X'));
        assert!(screen.contains("Robot is thinking..."));
        assert!(screen.contains("You 0 : 0 Robot"));
    }

    #[test]
    fn test_renders_announcement() {
        let mut app = App::new();
        app.handle_key(KeyCode::Char('1'));
        for (reply, next) in [(Position::MiddleLeft, '2'), (Position::Center, '3')] {
            let request = app.take_turn_request().unwrap();
            app.handle_event(crate::opponent::GameEvent::ComputerMoved {
                round: request.round,
                position: reply,
                tactic: robo_tictactoe::Tactic::Random,
            });
            app.handle_key(KeyCode::Char(next));
        }
        let screen = render(&app);
        assert!(screen.contains("YOU WIN!"));
        assert!(screen.contains("[ Enter: Hell yeah ]"));
    }
}
