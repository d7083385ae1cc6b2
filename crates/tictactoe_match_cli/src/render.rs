//! Turns match events into terminal output.

use anyhow::Result;
use tictactoe_match::{Board, MatchEvent, RoundOutcome, Seat};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// How events reach the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Board drawings and status lines.
    Text,
    /// One JSON object per event.
    Json,
}

/// Text renderer that mirrors the board from cell events.
pub struct Renderer {
    board: Board,
    names: [String; 2],
}

impl Renderer {
    /// Creates a renderer for the two players' names.
    pub fn new(name_a: impl Into<String>, name_b: impl Into<String>) -> Self {
        Self {
            board: Board::new(),
            names: [name_a.into(), name_b.into()],
        }
    }

    fn name(&self, seat: Seat) -> &str {
        match seat {
            Seat::A => &self.names[0],
            Seat::B => &self.names[1],
        }
    }

    /// Lines to print for one event.
    pub fn render(&mut self, event: &MatchEvent) -> Vec<String> {
        match event {
            MatchEvent::CellChanged { index, mark } => {
                if let Err(e) = self.board.place(*index, *mark) {
                    warn!(error = %e, "Board mirror out of sync");
                }
                vec![self.board.to_string()]
            }
            MatchEvent::TurnChanged { seat } => {
                vec![format!("{} ({}) to move", self.name(*seat), seat.mark())]
            }
            MatchEvent::AiThinking { seat } => {
                vec![format!("{} is thinking...", self.name(*seat))]
            }
            MatchEvent::RoundEnded {
                outcome,
                round,
                match_over,
            } => {
                let line = match outcome {
                    RoundOutcome::Won(mark) => {
                        format!("Round {}: {} wins", round, self.name(Seat::of_mark(*mark)))
                    }
                    RoundOutcome::Tied => format!("Round {}: {}", round, outcome),
                };
                if *match_over {
                    vec![line]
                } else {
                    vec![line, "Press n for the next round".to_string()]
                }
            }
            MatchEvent::ScoresChanged { score_a, score_b } => vec![format!(
                "Score: {} {} - {} {}",
                self.names[0], score_a, score_b, self.names[1]
            )],
            MatchEvent::RoundStarted { round, starter } => {
                self.board.clear();
                vec![
                    format!("Round {}, {} opens", round, self.name(*starter)),
                    self.board.to_string(),
                ]
            }
            MatchEvent::MatchEnded { result } => {
                vec![result.to_string(), "Press r to play again".to_string()]
            }
        }
    }
}

/// Prints events until every sender is gone.
pub async fn print_events(
    mut events: mpsc::UnboundedReceiver<MatchEvent>,
    mut renderer: Renderer,
    format: Format,
) -> Result<()> {
    while let Some(event) = events.recv().await {
        debug!(?event, "Rendering event");
        match format {
            Format::Json => println!("{}", serde_json::to_string(&event)?),
            Format::Text => {
                for line in renderer.render(&event) {
                    println!("{line}");
                }
            }
        }
    }
    Ok(())
}
