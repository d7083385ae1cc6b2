//! Multi-round tic-tac-toe with an optimal computer opponent.
//!
//! # Architecture
//!
//! - **Board**: 3x3 cell occupancy, line and full-board detection
//! - **Minimax**: exhaustive search producing the optimal move for a seat
//! - **Controller**: turn order, round lifecycle, scores and match termination
//! - **Session**: tokio driver that delays engine moves and cancels stale ones
//!
//! The presentation layer stays outside the crate. It sends commands to the
//! controller and renders the [`MatchEvent`]s pushed to its [`MatchObserver`].
//!
//! # Example
//!
//! ```
//! use tictactoe_match::{Control, MatchController, MatchEvent, Phase, Seat};
//!
//! let mut game = MatchController::new(Vec::<MatchEvent>::new());
//! game.configure_mode(Control::Human, Control::Human).unwrap();
//!
//! for index in [0, 3, 1, 4, 2] {
//!     game.request_placement(index).unwrap();
//! }
//!
//! assert!(matches!(game.phase(), Phase::RoundOver(_)));
//! assert_eq!(game.scores(), (1, 0));
//! assert_eq!(game.round_number(), 2);
//! assert_eq!(game.player(Seat::A).name(), "PLAYER_A");
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod board;
mod config;
mod controller;
mod error;
mod events;
mod minimax;
mod player;
mod session;

// Crate-level exports - Board
pub use board::{Board, CELL_COUNT, Cell, LINES, Mark, PlaceError};

// Crate-level exports - Players
pub use player::{Control, GameMode, Player, Seat};

// Crate-level exports - Decision engine
pub use minimax::{BestMove, LOSS, TIE, WIN, best_move};

// Crate-level exports - Match controller
pub use controller::{DECIDING_ROUND, MatchController, Phase, ScheduledMove};
pub use events::{MatchEvent, MatchObserver, MatchResult, NullObserver, RoundOutcome};

// Crate-level exports - Errors
pub use error::{ConfigurationError, MatchError, PlacementError};

// Crate-level exports - Configuration and async driver
pub use config::{ConfigError, MatchConfig};
pub use session::MatchSession;
