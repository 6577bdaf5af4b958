//! Computer move selection.
//!
//! The opponent follows a fixed priority list with no lookahead:
//! finish its own line, block the human's line, take the center,
//! otherwise pick any empty cell at random.

use super::action::MoveError;
use super::rules::WIN_PATTERNS;
use super::{Board, Player, Position};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

/// Which rule of the priority list produced the computer's move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum Tactic {
    /// Completes a line of the computer's own marks.
    #[strum(to_string = "wins")]
    WinNow,
    /// Fills the last cell of a line the human is about to complete.
    #[strum(to_string = "blocks")]
    Block,
    /// Takes the center cell.
    #[strum(to_string = "takes the center")]
    Center,
    /// Falls back to a uniformly random empty cell.
    #[strum(to_string = "picks")]
    Random,
}

/// Finds the empty cell that would complete a line for `player`.
///
/// Scans [`WIN_PATTERNS`] in order and returns the missing cell of the first
/// pattern where `player` already holds the other two.
#[instrument(skip(board), fields(board = %board))]
pub fn completing_cell(board: &Board, player: Player) -> Option<Position> {
    let owned = board.moves_of(player);
    WIN_PATTERNS.iter().find_map(|pattern| {
        let mut missing = pattern.iter().filter(|pos| !owned.contains(*pos));
        match (missing.next(), missing.next()) {
            (Some(&pos), None) if !board.is_occupied(pos) => Some(pos),
            _ => None,
        }
    })
}

/// Chooses the computer's next cell and reports the rule that chose it.
///
/// # Errors
///
/// Returns [`MoveError::NoAvailableCell`] on a full board.
#[instrument(skip(board, rng), fields(board = %board))]
pub fn plan_computer_move<R: Rng + ?Sized>(
    board: &Board,
    rng: &mut R,
) -> Result<(Position, Tactic), MoveError> {
    let empty = board.empty_cells();
    if empty.is_empty() {
        return Err(MoveError::NoAvailableCell);
    }

    if let Some(pos) = completing_cell(board, Player::Computer) {
        debug!(position = %pos, "Completing own line");
        return Ok((pos, Tactic::WinNow));
    }

    if let Some(pos) = completing_cell(board, Player::Human) {
        debug!(position = %pos, "Blocking human line");
        return Ok((pos, Tactic::Block));
    }

    if !board.is_occupied(Position::Center) {
        debug!("Taking center");
        return Ok((Position::Center, Tactic::Center));
    }

    let pos = *empty.choose(rng).ok_or(MoveError::NoAvailableCell)?;
    debug!(position = %pos, candidates = empty.len(), "Random fallback");
    Ok((pos, Tactic::Random))
}

/// Chooses the computer's next cell.
///
/// # Errors
///
/// Returns [`MoveError::NoAvailableCell`] on a full board.
pub fn select_computer_move<R: Rng + ?Sized>(
    board: &Board,
    rng: &mut R,
) -> Result<Position, MoveError> {
    plan_computer_move(board, rng).map(|(pos, _)| pos)
}
