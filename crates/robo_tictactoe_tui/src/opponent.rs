//! Computer opponent task.
//!
//! The UI hands over a board snapshot, the opponent waits out its
//! "thinking" delay, asks the engine for a move and reports back over a
//! channel. Requests carry the round they belong to so replies that land
//! after a reset can be dropped by the UI.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use robo_tictactoe::{Board, MoveError, Position, Tactic, plan_computer_move};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Board snapshot the computer must answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnRequest {
    /// Game round the snapshot belongs to.
    pub round: u64,
    /// Board after the human's move.
    pub board: Board,
}

/// Messages sent from the opponent task to the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// The computer picked a cell.
    ComputerMoved {
        /// Round the move answers.
        round: u64,
        /// Chosen cell.
        position: Position,
        /// Rule that chose it.
        tactic: Tactic,
    },
    /// The engine refused to pick a cell.
    ComputerFailed {
        /// Round the failure answers.
        round: u64,
        /// Engine error.
        error: MoveError,
    },
}

/// Heuristic computer player with an artificial reply delay.
#[derive(Debug)]
pub struct ComputerPlayer {
    rng: ChaCha8Rng,
    delay: Duration,
}

impl ComputerPlayer {
    /// Creates a player; `seed` makes the random fallback reproducible.
    #[instrument]
    pub fn new(seed: Option<u64>, delay: Duration) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self { rng, delay }
    }

    /// Waits the configured delay, then answers one request.
    #[instrument(skip(self, request), fields(round = request.round, board = %request.board))]
    pub async fn respond(&mut self, request: TurnRequest) -> GameEvent {
        tokio::time::sleep(self.delay).await;

        match plan_computer_move(&request.board, &mut self.rng) {
            Ok((position, tactic)) => {
                debug!(%position, %tactic, "Computer chose position");
                GameEvent::ComputerMoved {
                    round: request.round,
                    position,
                    tactic,
                }
            }
            Err(error) => {
                warn!(%error, "Computer could not move");
                GameEvent::ComputerFailed {
                    round: request.round,
                    error,
                }
            }
        }
    }

    /// Serves requests until either channel closes.
    pub async fn run(
        mut self,
        mut requests: mpsc::UnboundedReceiver<TurnRequest>,
        events: mpsc::UnboundedSender<GameEvent>,
    ) {
        info!("Computer opponent ready");
        while let Some(request) = requests.recv().await {
            let event = self.respond(request).await;
            if events.send(event).is_err() {
                debug!("UI dropped the event channel");
                break;
            }
        }
        info!("Computer opponent stopped");
    }
}
