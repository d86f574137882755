//! Shared fixtures for session tests.

#![allow(dead_code)]

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashMap;
use std::time::Duration;

use strictly_memory::{
    CardId, Difficulty, EventLog, GameSession, Icon, ManualScheduler, MemoryScoreStore, Mode,
    ScoreStore, SessionConfig, StoreError,
};

/// Session wired to test collaborators.
pub type TestSession<S = MemoryScoreStore> = GameSession<ManualScheduler, S, EventLog>;

/// Creates a session with a seeded deck and an empty in-memory store.
pub fn session() -> TestSession {
    session_with_store(MemoryScoreStore::new())
}

/// Creates a session around the given store.
pub fn session_with_store<S: ScoreStore>(store: S) -> TestSession<S> {
    GameSession::new(ManualScheduler::new(), store, EventLog::new())
        .with_rng(StdRng::seed_from_u64(42))
}

/// Starts a session in the given mode and difficulty.
pub fn started(mode: Mode, difficulty: Difficulty) -> TestSession {
    let mut session = session();
    session
        .start(SessionConfig::new(mode, difficulty))
        .expect("Start failed");
    session
}

/// Milliseconds.
pub fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

/// Ids of each matching pair, in order of first appearance.
pub fn pairs<S: ScoreStore>(session: &TestSession<S>) -> Vec<(CardId, CardId)> {
    let mut first_seen: HashMap<Icon, CardId> = HashMap::new();
    let mut pairs = Vec::new();
    for card in session.state().cards() {
        match first_seen.get(&card.icon()) {
            Some(&first) => pairs.push((first, card.id())),
            None => {
                first_seen.insert(card.icon(), card.id());
            }
        }
    }
    pairs
}

/// Two cards with different icons.
pub fn mismatch<S: ScoreStore>(session: &TestSession<S>) -> (CardId, CardId) {
    let cards = session.state().cards();
    let first = &cards[0];
    let other = cards
        .iter()
        .find(|c| c.icon() != first.icon())
        .expect("Deck has at least two icons");
    (first.id(), other.id())
}

/// Advances the clock and delivers due timers.
pub fn advance<S: ScoreStore>(session: &mut TestSession<S>, by: Duration) -> usize {
    session.scheduler_mut().advance(by);
    session.pump()
}

/// Flips a mismatched pair and waits out the unflip delay.
pub fn miss_once<S: ScoreStore>(session: &mut TestSession<S>) {
    let (a, b) = mismatch(session);
    session.flip(a);
    session.flip(b);
    let delay = session.timings().unflip_delay;
    advance(session, delay);
}

/// Store whose reads and writes always fail.
#[derive(Debug, Default)]
pub struct BrokenStore {
    pub writes_attempted: usize,
}

impl ScoreStore for BrokenStore {
    fn get(&mut self, _mode: Mode, _difficulty: Difficulty) -> Result<Option<u32>, StoreError> {
        Err(StoreError::new("store unavailable"))
    }

    fn set(&mut self, _mode: Mode, _difficulty: Difficulty, _value: u32) -> Result<(), StoreError> {
        self.writes_attempted += 1;
        Err(StoreError::new("store unavailable"))
    }
}
