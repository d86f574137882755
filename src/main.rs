//! Strictly Memory - Unified CLI
//!
//! Terminal memory game and record listing.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use strictly_memory::{
    Cli, Command, SessionConfig, Settings, SqliteScoreStore, best_scores, format_record, run_tui,
    score_key,
};
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

/// Log file used while the terminal UI owns the screen.
const LOG_FILE: &str = "strictly_memory.log";

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(matches!(cli.command, Command::Play { .. }))?;

    let settings = Settings::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load settings from {}", cli.config.display()))?;

    match cli.command {
        Command::Play {
            mode,
            difficulty,
            db_path,
        } => run_play(settings, mode, difficulty, db_path),
        Command::Scores {
            db_path,
            json,
            clear,
        } => run_scores(settings, db_path, json, clear),
    }
}

/// Logs to a file for the TUI, to stderr otherwise.
fn init_tracing(to_file: bool) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if to_file {
        let log_file = std::fs::File::create(LOG_FILE)
            .with_context(|| format!("Failed to create {}", LOG_FILE))?;
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::sync::Arc::new(log_file))
            .with_ansi(false)
            .try_init();
    } else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }
    Ok(())
}

/// Run the terminal game
#[instrument(skip(settings))]
fn run_play(
    settings: Settings,
    mode: Option<strictly_memory::Mode>,
    difficulty: Option<strictly_memory::Difficulty>,
    db_path: Option<String>,
) -> Result<()> {
    let defaults = settings.session_config();
    let settings = match db_path {
        Some(path) => settings.with_db_path(path),
        None => settings,
    };

    let start = (mode.is_some() || difficulty.is_some()).then(|| {
        SessionConfig::new(
            mode.unwrap_or(defaults.mode),
            difficulty.unwrap_or(defaults.difficulty),
        )
    });
    debug!(?start, "Launching TUI");

    run_tui(&settings, start)
}

/// One row of the `scores` listing.
#[derive(Serialize)]
struct ScoreLine {
    key: String,
    mode: String,
    difficulty: String,
    value: Option<u32>,
    display: Option<String>,
}

/// Print or clear stored records
#[instrument(skip(settings))]
fn run_scores(settings: Settings, db_path: Option<String>, json: bool, clear: bool) -> Result<()> {
    let db_path = db_path.unwrap_or_else(|| settings.storage().db_path().clone());
    let mut store = SqliteScoreStore::open(&db_path)
        .with_context(|| format!("Failed to open score database {}", db_path))?;

    if clear {
        let deleted = store.clear().context("Failed to clear records")?;
        info!(deleted, "Records cleared");
        println!("Cleared {} record(s)", deleted);
        return Ok(());
    }

    let lines: Vec<ScoreLine> = best_scores(&mut store)
        .into_iter()
        .map(|(config, value)| ScoreLine {
            key: score_key(config.mode, config.difficulty),
            mode: config.mode.to_string(),
            difficulty: config.difficulty.to_string(),
            value,
            display: value.map(|v| format_record(config.mode, v)),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&lines)?);
    } else {
        for line in &lines {
            println!(
                "{:<8} {:<7} {}",
                line.mode,
                line.difficulty,
                line.display.as_deref().unwrap_or("-")
            );
        }
    }
    Ok(())
}
