//! Application state and input handling.

use crate::announcement::Announcement;
use crate::input::{digit_position, move_cursor};
use crate::opponent::{GameEvent, TurnRequest};
use crossterm::event::KeyCode;
use robo_tictactoe::{Game, GameStatus, MoveError, Player, Position};
use tracing::{debug, info, instrument, warn};

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Keep running.
    Continue,
    /// Leave the application.
    Quit,
}

/// Session tally of finished games. Lives only as long as the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Scoreboard {
    /// Games the human won.
    pub human_wins: u32,
    /// Games the computer won.
    pub computer_wins: u32,
    /// Games that filled the board.
    pub draws: u32,
}

impl Scoreboard {
    fn record(&mut self, status: GameStatus) {
        match status {
            GameStatus::HumanWon => self.human_wins += 1,
            GameStatus::ComputerWon => self.computer_wins += 1,
            GameStatus::Draw => self.draws += 1,
            GameStatus::InProgress => {}
        }
    }
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    game: Game,
    cursor: Position,
    status_message: String,
    round: u64,
    awaiting_computer: bool,
    pending_request: Option<TurnRequest>,
    announcement: Option<Announcement>,
    scoreboard: Scoreboard,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Creates the application with a fresh game.
    pub fn new() -> Self {
        Self {
            game: Game::new(),
            cursor: Position::Center,
            status_message: "Your move.".to_string(),
            round: 0,
            awaiting_computer: false,
            pending_request: None,
            announcement: None,
            scoreboard: Scoreboard::default(),
        }
    }

    /// Gets the current game.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Gets the highlighted cell.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Open end-of-game dialog, if any.
    pub fn announcement(&self) -> Option<&Announcement> {
        self.announcement.as_ref()
    }

    /// Session tally.
    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    /// True while the computer is thinking; human input is ignored.
    pub fn is_board_disabled(&self) -> bool {
        self.awaiting_computer
    }

    /// Hands the next computer turn to the event loop, at most once.
    pub fn take_turn_request(&mut self) -> Option<TurnRequest> {
        self.pending_request.take()
    }

    /// Routes a key press.
    #[instrument(skip(self), fields(round = self.round))]
    pub fn handle_key(&mut self, key: KeyCode) -> KeyOutcome {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => return KeyOutcome::Quit,
            _ => {}
        }

        if self.announcement.is_some() {
            if matches!(key, KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('r')) {
                self.start_next_game();
            }
            return KeyOutcome::Continue;
        }

        match key {
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = move_cursor(self.cursor, key);
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.place_human(self.cursor),
            KeyCode::Char(c) => {
                if let Some(pos) = digit_position(c) {
                    self.cursor = pos;
                    self.place_human(pos);
                }
            }
            _ => {}
        }
        KeyOutcome::Continue
    }

    /// Applies the human's mark at `pos`.
    #[instrument(skip(self), fields(round = self.round))]
    pub fn place_human(&mut self, pos: Position) {
        if self.awaiting_computer {
            debug!("Board disabled while computer is thinking");
            return;
        }

        match self.game.play(Player::Human, pos) {
            Ok(GameStatus::InProgress) => {
                self.awaiting_computer = true;
                self.pending_request = Some(TurnRequest {
                    round: self.round,
                    board: *self.game.board(),
                });
                self.status_message = "Robot is thinking...".to_string();
            }
            Ok(status) => self.finish(status),
            Err(MoveError::CellOccupied(pos)) => {
                debug!(%pos, "Ignoring tap on occupied cell");
                self.status_message = format!("{} is taken, pick another cell.", pos);
            }
            Err(e) => {
                warn!(error = %e, "Human move rejected");
                self.status_message = format!("Move error: {}", e);
            }
        }
    }

    /// Handles a message from the computer opponent.
    #[instrument(skip(self), fields(round = self.round))]
    pub fn handle_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::ComputerMoved {
                round,
                position,
                tactic,
            } => {
                if round != self.round || !self.awaiting_computer {
                    debug!(round, "Dropping stale computer move");
                    return;
                }
                self.awaiting_computer = false;
                match self.game.play(Player::Computer, position) {
                    Ok(GameStatus::InProgress) => {
                        self.status_message =
                            format!("Robot {} {}. Your move.", tactic, position);
                    }
                    Ok(status) => self.finish(status),
                    Err(e) => {
                        warn!(error = %e, "Computer move rejected, restarting");
                        self.start_next_game();
                        self.status_message =
                            format!("Robot made an illegal move ({}). New game.", e);
                    }
                }
            }
            GameEvent::ComputerFailed { round, error } => {
                if round != self.round {
                    return;
                }
                warn!(%error, "Computer failed to move, restarting");
                self.start_next_game();
                self.status_message = format!("Robot gave up ({}). New game.", error);
            }
        }
    }

    fn finish(&mut self, status: GameStatus) {
        info!(?status, round = self.round, "Game over");
        self.scoreboard.record(status);
        self.announcement = Announcement::for_status(status);
        self.status_message = match status.winner() {
            Some(player) => format!("{} wins!", player),
            None => "Board full.".to_string(),
        };
    }

    /// Dismisses the announcement and resets the board.
    #[instrument(skip(self), fields(round = self.round))]
    pub fn start_next_game(&mut self) {
        self.game.reset();
        self.round += 1;
        self.cursor = Position::Center;
        self.awaiting_computer = false;
        self.pending_request = None;
        self.announcement = None;
        self.status_message = "New game. Your move.".to_string();
        info!(round = self.round, "Game restarted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use robo_tictactoe::Tactic;

    fn computer_reply(app: &mut App, position: Position) {
        let request = app.take_turn_request().expect("computer turn requested");
        app.handle_event(GameEvent::ComputerMoved {
            round: request.round,
            position,
            tactic: Tactic::Random,
        });
    }

    #[test]
    fn test_human_move_requests_computer_turn() {
        let mut app = App::new();
        assert_eq!(app.handle_key(KeyCode::Char('1')), KeyOutcome::Continue);

        assert!(app.is_board_disabled());
        let request = app.take_turn_request().unwrap();
        assert!(request.board.is_occupied(Position::TopLeft));
        assert_eq!(app.take_turn_request(), None);
    }

    #[test]
    fn test_input_ignored_while_computer_thinks() {
        let mut app = App::new();
        app.handle_key(KeyCode::Char('1'));
        app.handle_key(KeyCode::Char('2'));
        assert!(!app.game().board().is_occupied(Position::TopCenter));
    }

    #[test]
    fn test_occupied_cell_leaves_board_unchanged() {
        let mut app = App::new();
        app.handle_key(KeyCode::Char('5'));
        computer_reply(&mut app, Position::TopLeft);
        let before = *app.game().board();

        app.handle_key(KeyCode::Char('1'));
        assert_eq!(app.game().board(), &before);
        assert!(!app.is_board_disabled());
        assert!(app.status_message().contains("taken"));
    }

    #[test]
    fn test_cursor_placement() {
        let mut app = App::new();
        app.handle_key(KeyCode::Up);
        app.handle_key(KeyCode::Left);
        assert_eq!(app.cursor(), Position::TopLeft);
        app.handle_key(KeyCode::Enter);
        assert!(app.game().board().is_occupied(Position::TopLeft));
    }

    #[test]
    fn test_human_win_announces_and_resets() {
        let mut app = App::new();
        app.handle_key(KeyCode::Char('1'));
        computer_reply(&mut app, Position::MiddleLeft);
        app.handle_key(KeyCode::Char('2'));
        computer_reply(&mut app, Position::Center);
        app.handle_key(KeyCode::Char('3'));

        assert_eq!(app.game().status(), GameStatus::HumanWon);
        assert_eq!(app.announcement().map(|a| a.title), Some("YOU WIN!"));
        assert_eq!(app.scoreboard().human_wins, 1);
        assert_eq!(app.take_turn_request(), None);

        // Board input is swallowed until the dialog is dismissed.
        app.handle_key(KeyCode::Char('9'));
        assert!(!app.game().board().is_occupied(Position::BottomRight));

        app.handle_key(KeyCode::Enter);
        assert!(app.announcement().is_none());
        assert_eq!(app.game().status(), GameStatus::InProgress);
        assert_eq!(app.game().board().empty_cells().len(), 9);
    }

    #[test]
    fn test_computer_win_updates_scoreboard() {
        let mut app = App::new();
        app.handle_key(KeyCode::Char('1'));
        computer_reply(&mut app, Position::Center);
        app.handle_key(KeyCode::Char('2'));
        computer_reply(&mut app, Position::TopRight);
        app.handle_key(KeyCode::Char('9'));
        computer_reply(&mut app, Position::BottomLeft);

        assert_eq!(app.game().status(), GameStatus::ComputerWon);
        assert_eq!(app.announcement().map(|a| a.button), Some("Hell no"));
        assert_eq!(app.scoreboard().computer_wins, 1);
    }

    #[test]
    fn test_stale_reply_after_reset_is_dropped() {
        let mut app = App::new();
        app.handle_key(KeyCode::Char('1'));
        let stale = app.take_turn_request().unwrap();
        app.start_next_game();

        app.handle_event(GameEvent::ComputerMoved {
            round: stale.round,
            position: Position::Center,
            tactic: Tactic::Center,
        });
        assert!(!app.game().board().is_occupied(Position::Center));
    }

    #[test]
    fn test_rejected_computer_move_starts_new_game() {
        let mut app = App::new();
        app.handle_key(KeyCode::Char('1'));
        // Reply on the human's own cell is refused by the engine.
        computer_reply(&mut app, Position::TopLeft);

        assert!(!app.is_board_disabled());
        assert_eq!(app.game().to_move(), Player::Human);
        assert!(app.status_message().contains("New game"));
        app.handle_key(KeyCode::Char('5'));
        assert!(app.game().board().is_occupied(Position::Center));
    }

    #[test]
    fn test_computer_failure_starts_new_game() {
        let mut app = App::new();
        app.handle_key(KeyCode::Char('1'));
        let request = app.take_turn_request().unwrap();
        app.handle_event(GameEvent::ComputerFailed {
            round: request.round,
            error: MoveError::NoAvailableCell,
        });

        assert_eq!(app.game().to_move(), Player::Human);
        assert!(app.status_message().contains("Robot gave up"));
        app.handle_key(KeyCode::Char('3'));
        assert!(app.game().board().is_occupied(Position::TopRight));
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new();
        assert_eq!(app.handle_key(KeyCode::Char('q')), KeyOutcome::Quit);
        assert_eq!(app.handle_key(KeyCode::Esc), KeyOutcome::Quit);
    }
}
