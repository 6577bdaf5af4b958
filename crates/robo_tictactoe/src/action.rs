//! Placed marks and the errors raised when placing them.

use super::game::GameStatus;
use super::position::Position;
use super::types::Player;
use serde::{Deserialize, Serialize};

/// A mark placed by one player at one cell.
///
/// Moves are values: created once when placed and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Move {
    player: Player,
    position: Position,
}

impl Move {
    /// Returns the player who placed this mark.
    pub fn player(&self) -> Player {
        self.player
    }

    /// Returns the cell of this mark.
    pub fn position(&self) -> Position {
        self.position
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.position.label())
    }
}

/// Caller-contract violations reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The cell already holds a mark.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(Position),

    /// Move selection was requested on a full board.
    #[display("No available cell left on the board")]
    NoAvailableCell,

    /// The game reached a terminal state and must be reset first.
    #[display("Game is already over ({:?})", _0)]
    GameOver(GameStatus),

    /// The player moved out of turn.
    #[display("It's not {}'s turn", _0)]
    WrongTurn(Player),
}

impl std::error::Error for MoveError {}
