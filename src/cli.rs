//! Command-line interface for strictly_memory.

use clap::{Parser, Subcommand};

use crate::games::memory::{Difficulty, Mode};

/// Strictly Memory - card-flip memory game in the terminal
#[derive(Parser, Debug)]
#[command(name = "strictly_memory")]
#[command(about = "Card-flip memory game with persistent best results", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the settings file (missing file means defaults)
    #[arg(short, long, global = true, default_value = crate::settings::DEFAULT_SETTINGS_FILE)]
    pub config: std::path::PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Start straight away in this mode (basic, limited, timed)
        #[arg(short, long)]
        mode: Option<Mode>,

        /// Difficulty to start with (easy, medium, hard)
        #[arg(short, long)]
        difficulty: Option<Difficulty>,

        /// Override the record database path
        #[arg(long)]
        db_path: Option<String>,
    },

    /// Print best results for every mode and difficulty
    Scores {
        /// Override the record database path
        #[arg(long)]
        db_path: Option<String>,

        /// Print as JSON
        #[arg(long)]
        json: bool,

        /// Delete all stored records instead of printing them
        #[arg(long)]
        clear: bool,
    },
}
