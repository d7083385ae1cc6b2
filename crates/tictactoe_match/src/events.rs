//! Events pushed from the controller to the presentation adapter.

use crate::board::Mark;
use crate::player::Seat;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::debug;

/// Outcome of a finished round.
///
/// A round still being played is [`Phase::AwaitingMove`](crate::Phase::AwaitingMove).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// A mark completed a line.
    Won(Mark),
    /// The board filled up without a line.
    Tied,
}

impl RoundOutcome {
    /// Returns the winning mark if there is one.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            RoundOutcome::Won(mark) => Some(*mark),
            RoundOutcome::Tied => None,
        }
    }
}

impl std::fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundOutcome::Won(mark) => write!(f, "{} wins", mark),
            RoundOutcome::Tied => write!(f, "Tie"),
        }
    }
}

/// Final result of a match.
///
/// A match only ends while the scores differ, so there is always a winner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchResult {
    /// Seat of the winning player.
    pub winner: Seat,
    /// Display name of the winning player.
    pub name: String,
    /// Final score of seat A.
    pub score_a: u32,
    /// Final score of seat B.
    pub score_b: u32,
}

impl std::fmt::Display for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} WON ({}-{})", self.name, self.score_a, self.score_b)
    }
}

/// Something the adapter should render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MatchEvent {
    /// A mark was placed.
    CellChanged {
        /// Board index.
        index: usize,
        /// Mark now in the cell.
        mark: Mark,
    },
    /// It is now `seat`'s move.
    TurnChanged {
        /// Side to move.
        seat: Seat,
    },
    /// The engine is holding the move lock for `seat`.
    AiThinking {
        /// Engine-controlled seat.
        seat: Seat,
    },
    /// A round reached a terminal board.
    RoundEnded {
        /// Win or tie.
        outcome: RoundOutcome,
        /// Number of the round that just finished.
        round: u32,
        /// True when this round decided the match; no next round follows.
        match_over: bool,
    },
    /// Cumulative scores after a round or a restart.
    ScoresChanged {
        /// Seat A's score.
        score_a: u32,
        /// Seat B's score.
        score_b: u32,
    },
    /// A round begins on an empty board.
    RoundStarted {
        /// Number of the round about to be played.
        round: u32,
        /// Seat opening the round.
        starter: Seat,
    },
    /// The match is decided.
    MatchEnded {
        /// Winner and final score.
        result: MatchResult,
    },
}

/// Receiver of controller events.
///
/// The controller owns its observer and calls it synchronously, in the
/// order state changes happen.
pub trait MatchObserver {
    /// Handles one event.
    fn notify(&mut self, event: MatchEvent);
}

/// Collects events in memory.
impl MatchObserver for Vec<MatchEvent> {
    fn notify(&mut self, event: MatchEvent) {
        self.push(event);
    }
}

/// Forwards events over a channel, as the terminal front end consumes them.
impl MatchObserver for mpsc::UnboundedSender<MatchEvent> {
    fn notify(&mut self, event: MatchEvent) {
        if let Err(e) = self.send(event) {
            debug!(event = ?e.0, "Event receiver dropped");
        }
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl MatchObserver for NullObserver {
    fn notify(&mut self, _event: MatchEvent) {}
}
