//! Per-game state machine.

use super::action::MoveError;
use super::rules::{check_draw, check_win};
use super::{Board, Player, Position};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

/// Where a game stands.
///
/// `HumanWon`, `ComputerWon` and `Draw` are terminal: only [`Game::reset`]
/// leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameStatus {
    /// Moves are still accepted.
    #[default]
    InProgress,
    /// The human completed a line.
    HumanWon,
    /// The computer completed a line.
    ComputerWon,
    /// The board filled up with no line completed.
    Draw,
}

impl GameStatus {
    /// True for every state except `InProgress`.
    pub fn is_terminal(self) -> bool {
        self != GameStatus::InProgress
    }

    /// The winning player, if the game ended in a win.
    pub fn winner(self) -> Option<Player> {
        match self {
            GameStatus::HumanWon => Some(Player::Human),
            GameStatus::ComputerWon => Some(Player::Computer),
            GameStatus::InProgress | GameStatus::Draw => None,
        }
    }

    fn won_by(player: Player) -> Self {
        match player {
            Player::Human => GameStatus::HumanWon,
            Player::Computer => GameStatus::ComputerWon,
        }
    }
}

/// A single game: board, whose turn it is, and the current status.
///
/// The human always moves first and turns alternate until a terminal status.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    to_move: Player,
    status: GameStatus,
}

impl Game {
    /// Starts a game on an empty board with the human to move.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player expected to move next.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Places `player`'s mark at `pos` and advances the state machine.
    ///
    /// Win is checked before draw, since the ninth mark can do both.
    ///
    /// # Errors
    ///
    /// - [`MoveError::GameOver`] once the game is in a terminal state
    /// - [`MoveError::WrongTurn`] if `player` is not the one to move
    /// - [`MoveError::CellOccupied`] if `pos` already holds a mark
    ///
    /// The game is unchanged on error.
    #[instrument(skip(self), fields(board = %self.board, to_move = %self.to_move))]
    pub fn play(&mut self, player: Player, pos: Position) -> Result<GameStatus, MoveError> {
        if self.status.is_terminal() {
            return Err(MoveError::GameOver(self.status));
        }
        if player != self.to_move {
            return Err(MoveError::WrongTurn(player));
        }

        self.board = self.board.apply_move(player, pos)?;

        self.status = if check_win(&self.board, player) {
            GameStatus::won_by(player)
        } else if check_draw(&self.board) {
            GameStatus::Draw
        } else {
            self.to_move = player.opponent();
            GameStatus::InProgress
        };

        if self.status.is_terminal() {
            info!(status = ?self.status, board = %self.board, "Game finished");
        }
        Ok(self.status)
    }

    /// Clears the board and hands the first move back to the human.
    #[instrument(skip(self), fields(status = ?self.status))]
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
