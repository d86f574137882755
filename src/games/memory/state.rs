//! Mutable state of one dealt session.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::phases::{Outcome, Phase};
use super::types::{Card, CardId, CardView};

/// Everything that changes while a session is played.
///
/// Mutated only by [`GameSession`](super::GameSession) transitions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub(super) cards: Vec<Card>,
    pub(super) pair_count: usize,
    pub(super) matched_pairs: usize,
    pub(super) attempts_used: u32,
    pub(super) seconds_remaining: u32,
    pub(super) pending: Vec<CardId>,
    pub(super) is_locked: bool,
    pub(super) is_over: bool,
    pub(super) started_at: Option<Duration>,
    pub(super) outcome: Option<Outcome>,
}

impl SessionState {
    /// Returns the cards in table order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the card with the given id.
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.0)
    }

    /// Returns the presentation-safe projection of the deck.
    pub fn views(&self) -> Vec<CardView> {
        self.cards.iter().map(Card::view).collect()
    }

    /// Returns the number of pairs in the deck.
    pub fn pair_count(&self) -> usize {
        self.pair_count
    }

    /// Returns the number of pairs matched so far.
    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    /// Returns the number of resolved two-card selections.
    pub fn attempts_used(&self) -> u32 {
        self.attempts_used
    }

    /// Returns the countdown value (timed mode).
    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    /// Returns the face-up cards awaiting resolution (at most two).
    pub fn pending(&self) -> &[CardId] {
        &self.pending
    }

    /// Returns true while flips are rejected.
    pub fn is_locked(&self) -> bool {
        self.is_locked
    }

    /// Returns true once the session has ended.
    pub fn is_over(&self) -> bool {
        self.is_over
    }

    /// Returns the scheduler timestamp of the first flip.
    pub fn started_at(&self) -> Option<Duration> {
        self.started_at
    }

    /// Returns the outcome once the session has ended.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Derives the state-machine phase. `Idle` is decided by the session.
    pub(super) fn phase(&self) -> Phase {
        if let Some(outcome) = self.outcome {
            Phase::Over(outcome)
        } else if self.is_locked {
            Phase::Locked
        } else if self.started_at.is_none() {
            Phase::Dealt
        } else if self.pending.is_empty() {
            Phase::AwaitingFirstFlip
        } else {
            Phase::AwaitingSecondFlip
        }
    }

    pub(super) fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.get_mut(id.0)
    }
}
