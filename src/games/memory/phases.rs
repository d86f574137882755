//! Session phases, outcomes and flip results.

use serde::{Deserialize, Serialize};

/// Outcome of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// All pairs matched within the mode's constraints.
    Win,
    /// Attempt budget or time ran out.
    Loss,
}

impl Outcome {
    /// Returns true for [`Outcome::Win`].
    pub fn is_win(self) -> bool {
        matches!(self, Outcome::Win)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Win => write!(f, "You win!"),
            Outcome::Loss => write!(f, "Game over"),
        }
    }
}

/// Phase of the session state machine, derived from [`SessionState`](super::SessionState).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// No config; nothing dealt.
    Idle,
    /// Deck dealt, no card flipped yet, clock not started.
    Dealt,
    /// Play started, no card pending.
    AwaitingFirstFlip,
    /// One card pending.
    AwaitingSecondFlip,
    /// Flips rejected: mismatch reveal or reset transition in progress.
    Locked,
    /// Session finished.
    Over(Outcome),
}

/// Why a flip request was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IgnoreReason {
    /// No session started.
    NotStarted,
    /// Session already over.
    SessionOver,
    /// Flips are locked.
    Locked,
    /// No card with that id.
    UnknownCard,
    /// Card already face up or matched.
    AlreadyRevealed,
}

/// Result of a flip request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlipResult {
    /// The flip was a no-op.
    Ignored(IgnoreReason),
    /// First card of a pair turned up.
    Revealed,
    /// Second card matched the first.
    Matched,
    /// Second card differed; cards turn back after the unflip delay.
    Mismatched,
    /// The flip ended the session.
    Finished(Outcome),
}

impl FlipResult {
    /// Returns true if the flip was ignored.
    pub fn is_ignored(&self) -> bool {
        matches!(self, FlipResult::Ignored(_))
    }
}
