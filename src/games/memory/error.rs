//! Errors surfaced by session operations.

/// Error returned when a session operation cannot proceed.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GameError {
    /// Unknown mode or difficulty.
    #[display("Invalid config: {}", _0)]
    InvalidConfig(String),

    /// More pairs requested than there are distinct icons.
    #[display("Cannot deal {} pairs from {} distinct icons", requested, available)]
    InsufficientIcons {
        /// Pairs requested.
        requested: usize,
        /// Distinct icons available.
        available: usize,
    },

    /// The session has no config yet (never started, or abandoned).
    #[display("No session has been started")]
    NotStarted,
}

impl std::error::Error for GameError {}
