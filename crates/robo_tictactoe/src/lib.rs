//! Robo tic-tac-toe rule engine.
//!
//! Pure functions and small value types for a single human playing against a
//! heuristic computer opponent on a 3x3 board.
//!
//! # Architecture
//!
//! - **Board**: nine optional [`Move`] slots, validated by [`Board::apply_move`]
//! - **Rules**: [`check_win`] and [`check_draw`] over a board
//! - **Strategy**: [`select_computer_move`] picks win-now, block, center, then random
//! - **Game**: [`Game`] drives the turn order and the [`GameStatus`] state machine
//!
//! # Example
//!
//! ```
//! use robo_tictactoe::{Game, GameStatus, Player, Position};
//!
//! let mut game = Game::new();
//! let status = game.play(Player::Human, Position::TopLeft).unwrap();
//! assert_eq!(status, GameStatus::InProgress);
//!
//! let mut rng = rand::thread_rng();
//! let reply = robo_tictactoe::select_computer_move(game.board(), &mut rng).unwrap();
//! assert_eq!(reply, Position::Center);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod game;
mod position;
mod rules;
mod strategy;
mod types;

pub use action::{Move, MoveError};
pub use game::{Game, GameStatus};
pub use position::Position;
pub use rules::{WIN_PATTERNS, check_draw, check_win, winner};
pub use strategy::{Tactic, completing_cell, plan_computer_move, select_computer_move};
pub use types::{Board, Player};

/// Returns a fresh empty board.
pub fn reset() -> Board {
    Board::new()
}
