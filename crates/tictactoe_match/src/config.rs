//! Match configuration loaded from TOML.

use crate::player::Control;
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Settings for a match session.
///
/// Every field has a default, so an empty file is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct MatchConfig {
    /// Display name of seat A.
    #[serde(default = "default_player_a_name")]
    player_a_name: String,

    /// Display name of seat B.
    #[serde(default = "default_player_b_name")]
    player_b_name: String,

    /// Pause before an engine move lands on the board, in milliseconds.
    #[serde(default = "default_ai_delay_ms")]
    ai_delay_ms: u64,

    /// Control source for seat A; asked for interactively when unset.
    #[serde(default)]
    #[setters(strip_option)]
    seat_a: Option<Control>,

    /// Control source for seat B; asked for interactively when unset.
    #[serde(default)]
    #[setters(strip_option)]
    seat_b: Option<Control>,
}

fn default_player_a_name() -> String {
    "PLAYER_A".to_string()
}

fn default_player_b_name() -> String {
    "PLAYER_B".to_string()
}

fn default_ai_delay_ms() -> u64 {
    2000
}

impl MatchConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(
            player_a = %config.player_a_name,
            player_b = %config.player_b_name,
            ai_delay_ms = config.ai_delay_ms,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// The engine delay as a [`Duration`].
    pub fn ai_delay(&self) -> Duration {
        Duration::from_millis(self.ai_delay_ms)
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            player_a_name: default_player_a_name(),
            player_b_name: default_player_b_name(),
            ai_delay_ms: default_ai_delay_ms(),
            seat_a: None,
            seat_b: None,
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
