//! Error types surfaced by the match controller.

use crate::board::PlaceError;
use crate::player::Seat;
use derive_more::{Display, From};

/// Why a placement request was refused.
///
/// Refusals leave the match untouched; adapters are expected to drop them,
/// since stale clicks during an engine move are routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, From)]
pub enum PlacementError {
    /// The board refused the cell.
    #[display("{}", _0)]
    #[from]
    Board(PlaceError),
    /// The match is not waiting for a move.
    #[display("No move expected while {}", _0)]
    WrongPhase(&'static str),
    /// The side to move is controlled by the engine.
    #[display("Seat {} is played by the engine", _0)]
    EngineTurn(Seat),
    /// An engine move is pending and holds the move lock.
    #[display("Moves are locked until the engine has played")]
    MoveLocked,
    /// A deferred engine move outlived the round it was computed for.
    #[display("Engine move from epoch {} discarded (current epoch {})", scheduled, current)]
    StaleMove {
        /// Epoch the move was computed in.
        scheduled: u64,
        /// Epoch of the match when the move came due.
        current: u64,
    },
}

impl std::error::Error for PlacementError {}

/// Why a mode selection was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ConfigurationError {
    /// Both seats were given to the engine.
    #[display("At least one player must be human")]
    BothSeatsAi,
    /// The mode is fixed once the match has been configured.
    #[display("Game mode is already set to {}", _0)]
    AlreadyConfigured(&'static str),
}

impl std::error::Error for ConfigurationError {}

/// Errors returned by [`MatchController`](crate::MatchController) commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, From)]
pub enum MatchError {
    /// Placement refused; the match state is unchanged.
    #[display("Invalid placement: {}", _0)]
    InvalidPlacement(PlacementError),
    /// Mode selection refused; the configuration prompt stays active.
    #[display("Invalid configuration: {}", _0)]
    InvalidConfiguration(ConfigurationError),
}

impl std::error::Error for MatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MatchError::InvalidPlacement(e) => Some(e),
            MatchError::InvalidConfiguration(e) => Some(e),
        }
    }
}

impl From<PlaceError> for MatchError {
    fn from(err: PlaceError) -> Self {
        MatchError::InvalidPlacement(PlacementError::Board(err))
    }
}

impl MatchError {
    /// True for refusals adapters should silently ignore.
    pub fn is_ignorable(&self) -> bool {
        matches!(self, MatchError::InvalidPlacement(_))
    }
}
