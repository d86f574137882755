//! Database models for stored records.

use chrono::NaiveDateTime;
use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;

use super::schema;

/// Stored best score row.
#[derive(Debug, Clone, Queryable, Selectable, Getters)]
#[diesel(table_name = schema::best_scores)]
pub struct BestScoreRow {
    /// `{mode}_{difficulty}` key.
    key: String,
    /// Integer record as text.
    value: String,
    /// When the record was written.
    updated_at: NaiveDateTime,
}

/// Insertable best score row; replaces any row with the same key.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::best_scores)]
pub struct NewBestScoreRow {
    key: String,
    value: String,
    updated_at: NaiveDateTime,
}
