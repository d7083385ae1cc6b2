//! Round and match state machine.
//!
//! The controller owns the board, both players and all round/match counters.
//! Adapters drive it with commands and watch it through a [`MatchObserver`].
//!
//! Engine moves are decided the moment an engine seat gets the turn, but
//! land on the board only when the caller hands the returned
//! [`ScheduledMove`] back through [`MatchController::apply_scheduled`]. The
//! gap is the "thinking" delay; placements are locked until then, and the
//! epoch stamped on the move makes it void once the board is cleared.

use crate::board::Board;
use crate::error::{ConfigurationError, MatchError, PlacementError};
use crate::events::{MatchEvent, MatchObserver, MatchResult, RoundOutcome};
use crate::minimax;
use crate::player::{Control, GameMode, Player, Seat};
use derive_new::new;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument, warn};

/// Round counter value at which a match may end.
pub const DECIDING_ROUND: u32 = 3;

/// Where the match stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the one-time mode selection.
    Configuring,
    /// Waiting for `seat` to place a mark.
    AwaitingMove(Seat),
    /// Round finished; waiting for the advance signal.
    RoundOver(RoundOutcome),
    /// Match decided; only a restart leaves this phase.
    MatchOver(MatchResult),
}

impl Phase {
    /// Short name for logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Configuring => "configuring",
            Phase::AwaitingMove(_) => "awaiting a move",
            Phase::RoundOver(_) => "the round is over",
            Phase::MatchOver(_) => "the match is over",
        }
    }
}

/// An engine move waiting out its delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct ScheduledMove {
    /// Seat the engine plays for.
    pub seat: Seat,
    /// Cell the engine chose.
    pub index: usize,
    /// Minimax value of the move for `seat`.
    pub score: i32,
    /// Round epoch the move belongs to.
    pub epoch: u64,
}

/// State machine for a multi-round match.
#[derive(Debug)]
pub struct MatchController<O> {
    board: Board,
    player_a: Player,
    player_b: Player,
    mode: Option<GameMode>,
    phase: Phase,
    round: u32,
    starter: Seat,
    epoch: u64,
    pending: Option<ScheduledMove>,
    observer: O,
}

impl<O: MatchObserver> MatchController<O> {
    /// Creates a controller with the default player names.
    pub fn new(observer: O) -> Self {
        Self::with_names("PLAYER_A", "PLAYER_B", observer)
    }

    /// Creates a controller with custom player names.
    #[instrument(skip(name_a, name_b, observer), fields(a = %name_a.as_ref(), b = %name_b.as_ref()))]
    pub fn with_names(name_a: impl AsRef<str>, name_b: impl AsRef<str>, observer: O) -> Self {
        Self {
            board: Board::new(),
            player_a: Player::new(Seat::A, name_a),
            player_b: Player::new(Seat::B, name_b),
            mode: None,
            phase: Phase::Configuring,
            round: 1,
            starter: Seat::A,
            epoch: 0,
            pending: None,
            observer,
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Commands
    // ─────────────────────────────────────────────────────────────

    /// Picks the control source of each seat and starts round one.
    ///
    /// Returns the engine's opening move if seat A is engine-controlled.
    ///
    /// # Errors
    ///
    /// Rejects two engine seats and any second configuration attempt; in both
    /// cases nothing changes.
    #[instrument(skip(self))]
    pub fn configure_mode(
        &mut self,
        seat_a: Control,
        seat_b: Control,
    ) -> Result<Option<ScheduledMove>, MatchError> {
        if let Some(mode) = self.mode {
            warn!(mode = mode.name(), "Mode already configured");
            return Err(ConfigurationError::AlreadyConfigured(mode.name()).into());
        }

        let mode = GameMode::from_controls(seat_a, seat_b);
        if mode == GameMode::AiVsAi {
            warn!("Rejected engine-only configuration");
            return Err(ConfigurationError::BothSeatsAi.into());
        }

        info!(mode = mode.name(), "Game mode configured");
        self.mode = Some(mode);
        Ok(self.start_round())
    }

    /// Places the side to move's mark at `index` on behalf of a human.
    ///
    /// Returns the engine's reply when the turn passes to an engine seat.
    ///
    /// # Errors
    ///
    /// Refuses out-of-range or occupied cells, requests outside
    /// [`Phase::AwaitingMove`], engine turns and requests during the move
    /// lock. Refusals change nothing.
    #[instrument(skip(self))]
    pub fn request_placement(&mut self, index: usize) -> Result<Option<ScheduledMove>, MatchError> {
        let seat = self.awaiting_seat()?;
        if self.pending.is_some() {
            debug!(index, "Placement refused during engine move");
            return Err(PlacementError::MoveLocked.into());
        }
        if self.control(seat) == Control::Ai {
            debug!(index, %seat, "Placement refused on engine turn");
            return Err(PlacementError::EngineTurn(seat).into());
        }
        self.apply(seat, index)
    }

    /// Lands an engine move once its delay has passed.
    ///
    /// # Errors
    ///
    /// Returns [`PlacementError::StaleMove`] if the board was cleared since
    /// the move was scheduled, or if it is not the outstanding move.
    #[instrument(skip(self))]
    pub fn apply_scheduled(&mut self, scheduled: ScheduledMove) -> Result<Option<ScheduledMove>, MatchError> {
        if scheduled.epoch != self.epoch || self.pending != Some(scheduled) {
            debug!(current = self.epoch, "Discarding stale engine move");
            return Err(PlacementError::StaleMove {
                scheduled: scheduled.epoch,
                current: self.epoch,
            }
            .into());
        }
        self.pending = None;
        self.apply(scheduled.seat, scheduled.index)
    }

    /// Starts the next round after a finished one.
    ///
    /// The new round is opened by the seat that did not open the previous
    /// one. Ignored unless the phase is [`Phase::RoundOver`]. Returns the
    /// engine's opening move when the new starter is engine-controlled.
    #[instrument(skip(self))]
    pub fn request_advance_round(&mut self) -> Option<ScheduledMove> {
        if !matches!(self.phase, Phase::RoundOver(_)) {
            debug!(phase = self.phase.name(), "Advance ignored");
            return None;
        }

        self.reset_round();
        self.starter = self.starter.opponent();
        info!(round = self.round, starter = %self.starter, "Next round");
        self.start_round()
    }

    /// Resets the whole match, keeping the configured mode.
    ///
    /// Valid in every phase. Scores go back to zero, the round counter to
    /// one and seat A opens. Before configuration only the counters reset.
    #[instrument(skip(self))]
    pub fn request_restart(&mut self) -> Option<ScheduledMove> {
        self.reset_round();
        for seat in Seat::iter() {
            self.player_mut(seat).reset_score();
        }
        self.round = 1;
        self.starter = Seat::A;
        info!("Match restarted");
        self.observer.notify(MatchEvent::ScoresChanged {
            score_a: 0,
            score_b: 0,
        });

        if self.mode.is_none() {
            self.phase = Phase::Configuring;
            return None;
        }
        self.start_round()
    }

    // ─────────────────────────────────────────────────────────────
    //  Accessors
    // ─────────────────────────────────────────────────────────────

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The player in `seat`.
    pub fn player(&self, seat: Seat) -> &Player {
        match seat {
            Seat::A => &self.player_a,
            Seat::B => &self.player_b,
        }
    }

    /// Scores of seat A and seat B.
    pub fn scores(&self) -> (u32, u32) {
        (*self.player_a.score(), *self.player_b.score())
    }

    /// Current phase.
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// The configured mode, once chosen.
    pub fn mode(&self) -> Option<GameMode> {
        self.mode
    }

    /// Round counter: the round being played, or after a round ends, the
    /// round that comes next.
    pub fn round_number(&self) -> u32 {
        self.round
    }

    /// Seat that opened the current round.
    pub fn starter(&self) -> Seat {
        self.starter
    }

    /// Seat expected to move, if any.
    pub fn side_to_move(&self) -> Option<Seat> {
        match self.phase {
            Phase::AwaitingMove(seat) => Some(seat),
            _ => None,
        }
    }

    /// True while an engine move is waiting to land.
    pub fn is_move_locked(&self) -> bool {
        self.pending.is_some()
    }

    /// Counter bumped whenever the board is cleared.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// The observer receiving events.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Mutable access to the observer, e.g. to drain recorded events.
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    // ─────────────────────────────────────────────────────────────
    //  Transitions
    // ─────────────────────────────────────────────────────────────

    fn player_mut(&mut self, seat: Seat) -> &mut Player {
        match seat {
            Seat::A => &mut self.player_a,
            Seat::B => &mut self.player_b,
        }
    }

    fn control(&self, seat: Seat) -> Control {
        self.mode.map_or(Control::Human, |mode| mode.control(seat))
    }

    fn awaiting_seat(&self) -> Result<Seat, PlacementError> {
        match self.phase {
            Phase::AwaitingMove(seat) => Ok(seat),
            ref phase => {
                debug!(phase = phase.name(), "Placement outside of a turn");
                Err(PlacementError::WrongPhase(phase.name()))
            }
        }
    }

    fn start_round(&mut self) -> Option<ScheduledMove> {
        self.observer.notify(MatchEvent::RoundStarted {
            round: self.round,
            starter: self.starter,
        });
        self.begin_turn(self.starter)
    }

    /// Gives `seat` the turn and asks the engine for a move if it plays there.
    fn begin_turn(&mut self, seat: Seat) -> Option<ScheduledMove> {
        self.phase = Phase::AwaitingMove(seat);
        self.observer.notify(MatchEvent::TurnChanged { seat });

        if self.control(seat) != Control::Ai {
            return None;
        }

        let best = minimax::best_move(&self.board, seat.mark(), seat.opponent().mark());
        let scheduled = ScheduledMove::new(seat, best.index, best.score, self.epoch);
        debug!(?scheduled, "Engine move scheduled");
        self.pending = Some(scheduled);
        self.observer.notify(MatchEvent::AiThinking { seat });
        Some(scheduled)
    }

    fn apply(&mut self, seat: Seat, index: usize) -> Result<Option<ScheduledMove>, MatchError> {
        let mark = seat.mark();
        self.board
            .place(index, mark)
            .inspect_err(|e| debug!(index, error = %e, "Placement refused by board"))?;
        debug!(index, %mark, "Mark placed");
        self.observer.notify(MatchEvent::CellChanged { index, mark });

        if self.board.is_round_over() {
            self.finish_round();
            return Ok(None);
        }
        Ok(self.begin_turn(seat.opponent()))
    }

    fn finish_round(&mut self) {
        let outcome = match self.board.line_winner() {
            Some(mark) => RoundOutcome::Won(mark),
            None => RoundOutcome::Tied,
        };
        let finished = self.round;
        self.round += 1;
        if let Some(mark) = outcome.winner() {
            self.player_mut(Seat::of_mark(mark)).increase_score();
        }
        let (score_a, score_b) = self.scores();
        let match_over = self.round >= DECIDING_ROUND && score_a != score_b;

        info!(round = finished, %outcome, match_over, "Round over");
        self.observer.notify(MatchEvent::RoundEnded {
            outcome,
            round: finished,
            match_over,
        });
        self.observer.notify(MatchEvent::ScoresChanged { score_a, score_b });

        if match_over {
            let winner = if score_a > score_b { Seat::A } else { Seat::B };
            let result = MatchResult {
                winner,
                name: self.player(winner).name().clone(),
                score_a,
                score_b,
            };
            info!(%result, "Match over");
            self.phase = Phase::MatchOver(result.clone());
            self.observer.notify(MatchEvent::MatchEnded { result });
        } else {
            self.phase = Phase::RoundOver(outcome);
        }
    }

    /// Clears the board and voids any engine move still in flight.
    fn reset_round(&mut self) {
        if let Some(stale) = self.pending.take() {
            debug!(?stale, "Dropping pending engine move");
        }
        self.epoch += 1;
        self.board.clear();
    }
}
