//! In-memory score store.

use std::collections::HashMap;
use tracing::{debug, instrument};

use super::{ScoreStore, StoreError, parse_value, score_key};
use crate::games::memory::{Difficulty, Mode};

/// Score store kept in a map; nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    values: HashMap<String, String>,
}

impl MemoryScoreStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw text stored under `key`.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Stores raw text under `key`, bypassing formatting.
    pub fn insert_raw(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }
}

impl ScoreStore for MemoryScoreStore {
    #[instrument(skip(self))]
    fn get(&mut self, mode: Mode, difficulty: Difficulty) -> Result<Option<u32>, StoreError> {
        let key = score_key(mode, difficulty);
        Ok(self.values.get(&key).and_then(|text| parse_value(&key, text)))
    }

    #[instrument(skip(self))]
    fn set(&mut self, mode: Mode, difficulty: Difficulty, value: u32) -> Result<(), StoreError> {
        let key = score_key(mode, difficulty);
        debug!(key = %key, value, "Storing record");
        self.values.insert(key, value.to_string());
        Ok(())
    }
}
