//! Command-line interface for the terminal match.

use clap::Parser;
use std::path::PathBuf;
use tictactoe_match::{Control, MatchConfig};

/// Tic-tac-toe match against a friend or an unbeatable engine
#[derive(Parser, Debug)]
#[command(name = "tictactoe_match")]
#[command(about = "Play a best-of tic-tac-toe match in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML match configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Who plays seat A (X): human or ai
    #[arg(long)]
    pub player_a: Option<Control>,

    /// Who plays seat B (O): human or ai
    #[arg(long)]
    pub player_b: Option<Control>,

    /// Pause before an engine move lands, in milliseconds
    #[arg(long)]
    pub ai_delay_ms: Option<u64>,

    /// File that receives the log output
    #[arg(long, default_value = "tictactoe_match.log")]
    pub log_file: PathBuf,

    /// Print events as JSON lines instead of drawing the board
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Applies command-line overrides on top of file configuration.
    pub fn apply(&self, mut config: MatchConfig) -> MatchConfig {
        if let Some(control) = self.player_a {
            config = config.with_seat_a(control);
        }
        if let Some(control) = self.player_b {
            config = config.with_seat_b(control);
        }
        if let Some(delay) = self.ai_delay_ms {
            config = config.with_ai_delay_ms(delay);
        }
        config
    }
}
