//! Best-score persistence: one integer per mode and difficulty.

mod error;
mod memory;
mod models;
mod schema; // Diesel generated schema - internal use only
mod sqlite;

pub use error::StoreError;
pub use memory::MemoryScoreStore;
pub use models::BestScoreRow;
pub use sqlite::SqliteScoreStore;

use strum::IntoEnumIterator;
use tracing::{instrument, warn};

use crate::games::memory::{Difficulty, Mode, SessionConfig};

/// Persistent key-value store of best results.
///
/// Values are seconds (basic), attempts (limited) or seconds left (timed).
pub trait ScoreStore {
    /// Reads the stored record, if any.
    fn get(&mut self, mode: Mode, difficulty: Difficulty) -> Result<Option<u32>, StoreError>;

    /// Writes a record, replacing any previous value.
    fn set(&mut self, mode: Mode, difficulty: Difficulty, value: u32) -> Result<(), StoreError>;
}

impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn get(&mut self, mode: Mode, difficulty: Difficulty) -> Result<Option<u32>, StoreError> {
        (**self).get(mode, difficulty)
    }

    fn set(&mut self, mode: Mode, difficulty: Difficulty, value: u32) -> Result<(), StoreError> {
        (**self).set(mode, difficulty, value)
    }
}

/// Storage key for a mode and difficulty, e.g. `timed_hard`.
pub fn score_key(mode: Mode, difficulty: Difficulty) -> String {
    format!("{}_{}", mode, difficulty)
}

/// Parses stored text; anything that is not an integer counts as no record.
fn parse_value(key: &str, text: &str) -> Option<u32> {
    match text.trim().parse::<u32>() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key = %key, text = %text, error = %e, "Ignoring unparseable record");
            None
        }
    }
}

/// Reads the record for every mode and difficulty, best-effort.
///
/// A failed read is reported as no record.
#[instrument(skip(store))]
pub fn best_scores<S: ScoreStore + ?Sized>(store: &mut S) -> Vec<(SessionConfig, Option<u32>)> {
    let mut scores = Vec::new();
    for mode in Mode::iter() {
        for difficulty in Difficulty::iter() {
            let value = store.get(mode, difficulty).unwrap_or_else(|e| {
                warn!(error = %e, %mode, %difficulty, "Record read failed");
                None
            });
            scores.push((SessionConfig::new(mode, difficulty), value));
        }
    }
    scores
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_key_concatenates_names() {
        assert_eq!(score_key(Mode::Basic, Difficulty::Easy), "basic_easy");
        assert_eq!(score_key(Mode::Timed, Difficulty::Hard), "timed_hard");
    }

    #[test]
    fn test_parse_value_rejects_garbage() {
        assert_eq!(parse_value("k", "42"), Some(42));
        assert_eq!(parse_value("k", " 7 "), Some(7));
        assert_eq!(parse_value("k", "fast"), None);
        assert_eq!(parse_value("k", "-3"), None);
    }

    #[test]
    fn test_best_scores_lists_every_combination() {
        let mut store = MemoryScoreStore::new();
        store.set(Mode::Limited, Difficulty::Medium, 19).unwrap();
        let scores = best_scores(&mut store);
        assert_eq!(scores.len(), 9);
        let limited_medium = scores
            .iter()
            .find(|(c, _)| *c == SessionConfig::new(Mode::Limited, Difficulty::Medium))
            .unwrap();
        assert_eq!(limited_medium.1, Some(19));
        assert_eq!(scores.iter().filter(|(_, v)| v.is_some()).count(), 1);
    }
}
