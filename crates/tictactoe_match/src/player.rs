//! Seats, control sources and the two players of a match.

use crate::board::Mark;
use derive_getters::Getters;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// One of the two fixed match slots.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    Serialize,
    Deserialize,
    strum::EnumIter,
)]
pub enum Seat {
    /// Seat A plays X and opens the first round.
    A,
    /// Seat B plays O.
    B,
}

impl Seat {
    /// Returns the other seat.
    pub fn opponent(self) -> Self {
        match self {
            Seat::A => Seat::B,
            Seat::B => Seat::A,
        }
    }

    /// The mark bound to this seat.
    pub fn mark(self) -> Mark {
        match self {
            Seat::A => Mark::X,
            Seat::B => Mark::O,
        }
    }

    /// The seat holding `mark`.
    pub fn of_mark(mark: Mark) -> Self {
        match mark {
            Mark::X => Seat::A,
            Mark::O => Seat::B,
        }
    }
}

/// Who decides the moves for a seat.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Control {
    /// Moves come from the presentation adapter.
    #[default]
    Human,
    /// Moves come from the minimax engine.
    Ai,
}

/// Pairing of control sources to seats A and B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// Seat A is the engine, seat B a human.
    AiVsHuman,
    /// Both seats driven by the engine. Never accepted as a configuration.
    AiVsAi,
    /// Seat A is a human, seat B the engine.
    HumanVsAi,
    /// Two humans.
    HumanVsHuman,
}

impl GameMode {
    /// Builds the mode from the control source picked for each seat.
    pub fn from_controls(seat_a: Control, seat_b: Control) -> Self {
        match (seat_a, seat_b) {
            (Control::Ai, Control::Human) => GameMode::AiVsHuman,
            (Control::Ai, Control::Ai) => GameMode::AiVsAi,
            (Control::Human, Control::Ai) => GameMode::HumanVsAi,
            (Control::Human, Control::Human) => GameMode::HumanVsHuman,
        }
    }

    /// Control source of `seat` under this mode.
    pub fn control(self, seat: Seat) -> Control {
        match (self, seat) {
            (GameMode::AiVsHuman, Seat::A)
            | (GameMode::AiVsAi, _)
            | (GameMode::HumanVsAi, Seat::B) => Control::Ai,
            _ => Control::Human,
        }
    }

    /// Display name for menus and logs.
    pub fn name(&self) -> &'static str {
        match self {
            GameMode::AiVsHuman => "AI vs Human",
            GameMode::AiVsAi => "AI vs AI",
            GameMode::HumanVsAi => "Human vs AI",
            GameMode::HumanVsHuman => "Human vs Human",
        }
    }
}

/// A participant in the match: identity, mark and cumulative score.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Player {
    /// Stable identity; the seat never changes for the life of the match.
    seat: Seat,
    /// Display name used in match results.
    name: String,
    /// Mark placed on the board.
    mark: Mark,
    /// Rounds won since the last restart.
    score: u32,
}

impl Player {
    /// Creates the player sitting in `seat` with a zero score.
    #[instrument(skip(name), fields(name = %name.as_ref()))]
    pub fn new(seat: Seat, name: impl AsRef<str>) -> Self {
        Self {
            seat,
            name: name.as_ref().to_string(),
            mark: seat.mark(),
            score: 0,
        }
    }

    pub(crate) fn increase_score(&mut self) {
        self.score += 1;
    }

    pub(crate) fn reset_score(&mut self) {
        self.score = 0;
    }
}
