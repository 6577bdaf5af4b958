//! Game rules for tic-tac-toe.
//!
//! Pure functions for evaluating a board. Rules are kept apart from board
//! storage so the state machine and the computer strategy share them.

pub mod draw;
pub mod win;

pub use draw::check_draw;
pub use win::{WIN_PATTERNS, check_win, winner};
