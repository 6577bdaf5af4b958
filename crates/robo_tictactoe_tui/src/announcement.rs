//! End-of-game announcements.

use robo_tictactoe::GameStatus;

/// Dialog shown when a game reaches a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Announcement {
    /// Headline.
    pub title: &'static str,
    /// Body text.
    pub message: &'static str,
    /// Label of the button that starts the next game.
    pub button: &'static str,
}

const HUMAN_WINS: Announcement = Announcement {
    title: "YOU WIN!",
    message: "Congrats! You've beaten the robot",
    button: "Hell yeah",
};

const COMPUTER_WINS: Announcement = Announcement {
    title: "LOSER!",
    message: "You should think about training your brain",
    button: "Hell no",
};

const DRAW: Announcement = Announcement {
    title: "DRAW",
    message: "Bruh moment",
    button: "Hell bruh",
};

impl Announcement {
    /// Announcement for `status`, or `None` while the game is running.
    pub fn for_status(status: GameStatus) -> Option<Self> {
        match status {
            GameStatus::InProgress => None,
            GameStatus::HumanWon => Some(HUMAN_WINS),
            GameStatus::ComputerWon => Some(COMPUTER_WINS),
            GameStatus::Draw => Some(DRAW),
        }
    }
}
