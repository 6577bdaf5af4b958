//! Core domain types for the board.

use super::action::{Move, MoveError};
use super::position::Position;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::instrument;

/// Who placed a mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Player {
    /// The person at the keyboard. Always moves first.
    #[default]
    Human,
    /// The heuristic opponent.
    Computer,
}

impl Player {
    /// Returns the other player.
    pub fn opponent(self) -> Self {
        match self {
            Player::Human => Player::Computer,
            Player::Computer => Player::Human,
        }
    }

    /// Mark drawn on the board for this player.
    pub fn symbol(self) -> char {
        match self {
            Player::Human => 'X',
            Player::Computer => 'O',
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::Human => write!(f, "Human"),
            Player::Computer => write!(f, "Computer"),
        }
    }
}

/// 3x3 board of optional moves in row-major order.
///
/// A slot, once filled, is never overwritten: [`Board::apply_move`] refuses
/// occupied cells and returns a new board instead of mutating in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [Option<Move>; 9],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self { cells: [None; 9] }
    }

    /// Clears every cell.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Move stored at `pos`, if any.
    pub fn get(&self, pos: Position) -> Option<Move> {
        self.cells[pos.to_index()]
    }

    /// True if a mark has been placed at `pos`.
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.cells[pos.to_index()].is_some()
    }

    /// True if all nine cells carry a mark.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Iterates over the placed moves in board order.
    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.cells.iter().flatten().copied()
    }

    /// Positions held by `player`.
    pub fn moves_of(&self, player: Player) -> BTreeSet<Position> {
        self.moves()
            .filter(|m| m.player() == player)
            .map(|m| m.position())
            .collect()
    }

    /// Unoccupied positions in index order.
    pub fn empty_cells(&self) -> Vec<Position> {
        Position::ALL
            .iter()
            .copied()
            .filter(|pos| !self.is_occupied(*pos))
            .collect()
    }

    /// Returns a copy of the board with `player`'s mark at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::CellOccupied`] if `pos` already holds a mark.
    #[instrument(skip(self), fields(board = %self))]
    pub fn apply_move(&self, player: Player, pos: Position) -> Result<Board, MoveError> {
        if self.is_occupied(pos) {
            return Err(MoveError::CellOccupied(pos));
        }
        let mut next = *self;
        next.cells[pos.to_index()] = Some(Move::new(player, pos));
        Ok(next)
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, cell) in self.cells.iter().enumerate() {
            let symbol = cell.map_or('.', |m| m.player().symbol());
            write!(f, "{symbol}")?;
            if i % 3 == 2 && i < 8 {
                write!(f, "/")?;
            }
        }
        Ok(())
    }
}
