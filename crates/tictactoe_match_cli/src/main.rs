//! Tic-tac-toe match in the terminal.
//!
//! Reads commands from stdin: `1`-`9` places a mark, `n` starts the next
//! round, `r` restarts the match and `q` quits.

#![warn(missing_docs)]

mod cli;
mod render;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::Cli;
use render::{Format, Renderer, print_events};
use std::path::Path;
use std::sync::Arc;
use tictactoe_match::{Control, MatchConfig, MatchEvent, MatchSession, Seat};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::EnvFilter;

type Session = MatchSession<mpsc::UnboundedSender<MatchEvent>>;
type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(&cli.log_file)?;

    let config = match &cli.config {
        Some(path) => MatchConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => MatchConfig::default(),
    };
    let config = cli.apply(config);
    info!(?config, "Starting match");

    let (tx, rx) = mpsc::unbounded_channel();
    let renderer = Renderer::new(config.player_a_name(), config.player_b_name());
    let format = if cli.json { Format::Json } else { Format::Text };
    let printer = tokio::spawn(print_events(rx, renderer, format));

    let mut session = MatchSession::from_config(&config, tx);
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    if configure(&mut session, &config, &mut input).await? {
        play(&mut session, &mut input).await?;
    }

    drop(session);
    printer.await.context("event printer panicked")??;
    info!("Match closed");
    Ok(())
}

/// Sends logs to a file so they do not interleave with the board.
fn init_logging(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Settles the game mode. Returns false if input closed first.
#[instrument(skip_all)]
async fn configure(session: &mut Session, config: &MatchConfig, input: &mut Input) -> Result<bool> {
    if let (Some(seat_a), Some(seat_b)) = (*config.seat_a(), *config.seat_b()) {
        match session.configure_mode(seat_a, seat_b).await {
            Ok(()) => return Ok(true),
            Err(e) => println!("{e}"),
        }
    }

    loop {
        let Some(seat_a) = ask_control(Seat::A, input).await? else {
            return Ok(false);
        };
        let Some(seat_b) = ask_control(Seat::B, input).await? else {
            return Ok(false);
        };
        match session.configure_mode(seat_a, seat_b).await {
            Ok(()) => return Ok(true),
            Err(e) => {
                warn!(error = %e, "Mode refused");
                println!("{e}");
            }
        }
    }
}

async fn ask_control(seat: Seat, input: &mut Input) -> Result<Option<Control>> {
    loop {
        println!("Who plays seat {} ({})? [human/ai]", seat, seat.mark());
        let Some(line) = input.next_line().await? else {
            return Ok(None);
        };
        match line.trim().parse::<Control>() {
            Ok(control) => return Ok(Some(control)),
            Err(_) => println!("Please answer human or ai"),
        }
    }
}

/// Feeds commands to the session until `q` or end of input.
#[instrument(skip_all)]
async fn play(session: &mut Session, input: &mut Input) -> Result<()> {
    while let Some(line) = input.next_line().await? {
        let command = line.trim();
        match command {
            "" => continue,
            "q" | "quit" => break,
            "n" | "next" => session.request_advance_round().await,
            "r" | "restart" => session.request_restart().await,
            _ => match parse_cell(command) {
                Ok(index) => {
                    if let Err(e) = session.request_placement(index).await {
                        if !e.is_ignorable() {
                            return Err(e.into());
                        }
                        debug!(error = %e, "Placement ignored");
                    }
                }
                Err(e) => println!("{e}. Use 1-9, n, r or q"),
            },
        }
    }
    Ok(())
}

/// Maps the keypad digits 1-9 onto board indices.
fn parse_cell(command: &str) -> Result<usize> {
    let digit: usize = command
        .parse()
        .with_context(|| format!("'{command}' is not a cell"))?;
    if !(1..=9).contains(&digit) {
        bail!("Cell {digit} is off the board");
    }
    Ok(digit - 1)
}
