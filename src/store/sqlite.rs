//! SQLite-backed score store.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use super::models::{BestScoreRow, NewBestScoreRow};
use super::{ScoreStore, StoreError, parse_value, schema, score_key};
use crate::games::memory::{Difficulty, Mode};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Durable score store in a SQLite database file.
pub struct SqliteScoreStore {
    db_path: String,
    conn: SqliteConnection,
}

impl std::fmt::Debug for SqliteScoreStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteScoreStore")
            .field("db_path", &self.db_path)
            .finish_non_exhaustive()
    }
}

impl SqliteScoreStore {
    /// Opens (creating if needed) the database at `db_path` and applies migrations.
    ///
    /// Use `":memory:"` for a throwaway database.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the connection or a migration fails.
    #[instrument(skip(db_path), fields(db_path = %db_path.as_ref()))]
    pub fn open(db_path: impl AsRef<str>) -> Result<Self, StoreError> {
        let db_path = db_path.as_ref().to_string();
        info!(path = %db_path, "Opening score store");

        let mut conn = SqliteConnection::establish(&db_path)
            .map_err(|e| StoreError::new(format!("Failed to connect to '{}': {}", db_path, e)))?;

        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| StoreError::new(format!("Migration failed: {}", e)))?;
        debug!(applied = applied.len(), "Migrations applied");

        Ok(Self { db_path, conn })
    }

    /// Returns the database path.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Lists every stored row, ordered by key.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn rows(&mut self) -> Result<Vec<BestScoreRow>, StoreError> {
        let rows = schema::best_scores::table
            .order(schema::best_scores::key.asc())
            .select(BestScoreRow::as_select())
            .load(&mut self.conn)?;
        debug!(count = rows.len(), "Rows loaded");
        Ok(rows)
    }

    /// Deletes every stored record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn clear(&mut self) -> Result<usize, StoreError> {
        let deleted = diesel::delete(schema::best_scores::table).execute(&mut self.conn)?;
        info!(deleted, "Records cleared");
        Ok(deleted)
    }
}

impl ScoreStore for SqliteScoreStore {
    #[instrument(skip(self))]
    fn get(&mut self, mode: Mode, difficulty: Difficulty) -> Result<Option<u32>, StoreError> {
        let key = score_key(mode, difficulty);
        let row = schema::best_scores::table
            .find(key.as_str())
            .select(BestScoreRow::as_select())
            .first(&mut self.conn)
            .optional()?;

        Ok(row.and_then(|row| parse_value(&key, row.value())))
    }

    #[instrument(skip(self))]
    fn set(&mut self, mode: Mode, difficulty: Difficulty, value: u32) -> Result<(), StoreError> {
        let key = score_key(mode, difficulty);
        let row = NewBestScoreRow::new(key.clone(), value.to_string(), chrono::Utc::now().naive_utc());

        diesel::replace_into(schema::best_scores::table)
            .values(&row)
            .execute(&mut self.conn)?;

        info!(key = %key, value, "Record stored");
        Ok(())
    }
}
