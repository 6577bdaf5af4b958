//! Draw detection.

use super::super::Board;
use tracing::instrument;

/// True iff all nine cells are occupied.
///
/// A full board can also hold a win, so callers check [`super::check_win`]
/// before treating this as a draw.
#[instrument(skip(board), fields(board = %board))]
pub fn check_draw(board: &Board) -> bool {
    board.is_full()
}
