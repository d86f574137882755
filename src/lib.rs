//! Strictly Memory - card-flip memory game with a type-safe session core
//!
//! The library is the game itself, independent of any screen.
//!
//! # Architecture
//!
//! - **Games**: deck dealing, scoring rules and the [`GameSession`] state machine
//! - **Scheduler**: deferred unflips, countdown ticks and redeals as data
//! - **Render**: [`RenderSink`] notifications for whatever draws the table
//! - **Store**: best result per mode and difficulty, in memory or SQLite
//! - **TUI**: a terminal front end built on the pieces above
//!
//! # Example
//!
//! ```
//! use strictly_memory::{
//!     CardId, Difficulty, EventLog, GameSession, ManualScheduler, MemoryScoreStore, Mode,
//!     SessionConfig,
//! };
//!
//! let mut session = GameSession::new(ManualScheduler::new(), MemoryScoreStore::new(), EventLog::new());
//! session.start(SessionConfig::new(Mode::Limited, Difficulty::Easy))?;
//! assert_eq!(session.state().cards().len(), 12);
//! session.flip(CardId(0));
//! # Ok::<(), strictly_memory::GameError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod cli;
mod games;
mod render;
mod scheduler;
mod settings;
mod store;
mod tui;

// Crate-level exports - Game types
pub use games::memory::{
    Card, CardFace, CardId, CardView, Difficulty, DifficultyProfile, FlipResult, GameError,
    GameSession, ICONS, Icon, IgnoreReason, Invariant, InvariantSet, InvariantViolation,
    MatchedPairsInvariant, Mode, Outcome, PairedDeckInvariant, PendingSelectionInvariant, Phase,
    SessionConfig, SessionInvariants, SessionState, Timings, deal, format_clock, format_record,
    is_improvement, shuffle,
};

// Crate-level exports - Scheduler
pub use scheduler::{Fired, ManualScheduler, RealtimeScheduler, Scheduler, TimerEvent, TimerHandle};

// Crate-level exports - Render sink
pub use render::{BestResult, EventLog, RenderEvent, RenderSink, ResultDetail, ResultSummary};

// Crate-level exports - Score persistence
pub use store::{
    BestScoreRow, MemoryScoreStore, ScoreStore, SqliteScoreStore, StoreError, best_scores,
    score_key,
};

// Crate-level exports - Settings
pub use settings::{
    ConfigError, DEFAULT_SETTINGS_FILE, GameSettings, Settings, StorageSettings, TimingSettings,
};

// Crate-level exports - CLI and terminal front end
pub use cli::{Cli, Command};
pub use tui::{BoardView, run_tui};
