//! Memory (card-flip) game: deck, rules and session state machine.

mod deck;
mod error;
mod invariants;
mod phases;
mod rules;
mod session;
mod state;
mod types;

pub use deck::{deal, shuffle};
pub use error::GameError;
pub use invariants::{
    Invariant, InvariantSet, InvariantViolation, MatchedPairsInvariant, PairedDeckInvariant,
    PendingSelectionInvariant, SessionInvariants,
};
pub use phases::{FlipResult, IgnoreReason, Outcome, Phase};
pub use rules::{format_clock, format_record, is_improvement};
pub use session::{GameSession, Timings};
pub use state::SessionState;
pub use types::{
    Card, CardFace, CardId, CardView, Difficulty, DifficultyProfile, ICONS, Icon, Mode,
    SessionConfig,
};
