//! Tests for loading match configuration from disk.

use std::io::Write;
use std::time::Duration;
use tictactoe_match::{Control, MatchConfig, MatchSession, NullObserver, Seat};

#[test]
fn test_loads_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
player_a_name = "Ada"
player_b_name = "Grace"
ai_delay_ms = 10
seat_a = "human"
seat_b = "ai"
"#
    )
    .unwrap();

    let config = MatchConfig::from_file(file.path()).unwrap();
    assert_eq!(config.player_a_name(), "Ada");
    assert_eq!(config.ai_delay(), Duration::from_millis(10));
    assert_eq!(config.seat_a(), &Some(Control::Human));
    assert_eq!(config.seat_b(), &Some(Control::Ai));
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = MatchConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.contains("Failed to read config file"));
}

#[tokio::test]
async fn test_session_uses_configured_names_and_delay() {
    let config = MatchConfig::default()
        .with_player_b_name("Grace".to_string())
        .with_ai_delay_ms(5);
    let session = MatchSession::from_config(&config, NullObserver);

    assert_eq!(session.ai_delay(), Duration::from_millis(5));
    let name = session.inspect(|c| c.player(Seat::B).name().clone()).await;
    assert_eq!(name, "Grace");
}
