//! Win detection.

use super::super::{Board, Player, Position};
use tracing::instrument;

/// The eight winning triples, in enumeration order: rows, columns, diagonals.
///
/// Strategy lookups scan this table front to back, so the order is part of
/// the opponent's observable behavior.
pub const WIN_PATTERNS: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// True if some pattern is entirely held by `player`.
#[instrument(skip(board), fields(board = %board))]
pub fn check_win(board: &Board, player: Player) -> bool {
    let owned = board.moves_of(player);
    WIN_PATTERNS
        .iter()
        .any(|pattern| pattern.iter().all(|pos| owned.contains(pos)))
}

/// Returns the player holding a full pattern, if any.
#[instrument(skip(board), fields(board = %board))]
pub fn winner(board: &Board) -> Option<Player> {
    [Player::Human, Player::Computer]
        .into_iter()
        .find(|player| check_win(board, *player))
}
