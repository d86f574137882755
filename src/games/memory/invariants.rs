//! First-class invariants for a memory session.
//!
//! Checked after every transition in debug builds; testable on their own.

use std::collections::HashMap;

use super::state::SessionState;
use super::types::Icon;
use tracing::error;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Invariant: the deck holds exactly two cards of each of `pair_count` icons.
pub struct PairedDeckInvariant;

impl Invariant<SessionState> for PairedDeckInvariant {
    fn holds(state: &SessionState) -> bool {
        if state.cards().len() != state.pair_count() * 2 {
            return false;
        }
        let mut counts: HashMap<Icon, usize> = HashMap::new();
        for card in state.cards() {
            *counts.entry(card.icon()).or_default() += 1;
        }
        counts.len() == state.pair_count() && counts.values().all(|&n| n == 2)
    }

    fn description() -> &'static str {
        "Deck holds exactly two cards per icon"
    }
}

/// Invariant: at most two pending cards, all face up and unmatched.
pub struct PendingSelectionInvariant;

impl Invariant<SessionState> for PendingSelectionInvariant {
    fn holds(state: &SessionState) -> bool {
        state.pending().len() <= 2
            && state.pending().iter().all(|&id| {
                state
                    .card(id)
                    .is_some_and(|card| card.is_flipped() && !card.is_matched())
            })
    }

    fn description() -> &'static str {
        "Pending selection has at most two face-up unmatched cards"
    }
}

/// Invariant: matched cards agree with the matched pair counter.
pub struct MatchedPairsInvariant;

impl Invariant<SessionState> for MatchedPairsInvariant {
    fn holds(state: &SessionState) -> bool {
        let matched_cards = state.cards().iter().filter(|c| c.is_matched()).count();
        state.matched_pairs() <= state.pair_count() && matched_cards == state.matched_pairs() * 2
    }

    fn description() -> &'static str {
        "Matched cards equal twice the matched pair count"
    }
}

/// All session invariants as a composable set.
pub type SessionInvariants = (
    PairedDeckInvariant,
    PendingSelectionInvariant,
    MatchedPairsInvariant,
);

/// Asserts all invariants in debug builds.
pub(super) fn assert_invariants(state: &SessionState) {
    if let Err(violations) = SessionInvariants::check_all(state) {
        for violation in &violations {
            error!(invariant = %violation.description, "Session invariant violated");
        }
        debug_assert!(violations.is_empty(), "Session invariants violated: {:?}", violations);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::memory::deck;
    use crate::games::memory::types::CardId;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn dealt_state(pairs: usize) -> SessionState {
        let mut rng = StdRng::seed_from_u64(7);
        SessionState {
            cards: deck::deal(pairs, &mut rng).unwrap(),
            pair_count: pairs,
            ..SessionState::default()
        }
    }

    #[test]
    fn test_invariants_hold_for_fresh_deal() {
        assert!(SessionInvariants::check_all(&dealt_state(6)).is_ok());
    }

    #[test]
    fn test_detects_short_deck() {
        let mut state = dealt_state(6);
        state.cards.pop();
        let violations = SessionInvariants::check_all(&state).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].description, PairedDeckInvariant::description());
    }

    #[test]
    fn test_detects_face_down_pending_card() {
        let mut state = dealt_state(6);
        state.pending.push(CardId(0));
        assert!(!PendingSelectionInvariant::holds(&state));
    }

    #[test]
    fn test_detects_matched_counter_drift() {
        let mut state = dealt_state(6);
        state.matched_pairs = 1;
        assert!(!MatchedPairsInvariant::holds(&state));
    }
}
