//! Tests for best-score persistence.

mod common;

use common::{pairs, session_with_store};
use strictly_memory::{
    BestResult, Difficulty, MemoryScoreStore, Mode, ScoreStore, SessionConfig, SqliteScoreStore,
    best_scores, score_key,
};
use tempfile::NamedTempFile;

/// Creates a temporary database file and an open store on it. The file handle
/// must stay in scope to keep the file alive.
fn setup_test_db() -> (NamedTempFile, SqliteScoreStore) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();
    let store = SqliteScoreStore::open(&db_path).expect("Failed to open store");
    (db_file, store)
}

#[test]
fn test_empty_store_has_no_records() {
    let (_db, mut store) = setup_test_db();
    assert_eq!(store.get(Mode::Basic, Difficulty::Easy).unwrap(), None);
    assert!(store.rows().unwrap().is_empty());
}

#[test]
fn test_set_then_get() {
    let (_db, mut store) = setup_test_db();
    store.set(Mode::Limited, Difficulty::Hard, 31).unwrap();
    assert_eq!(store.get(Mode::Limited, Difficulty::Hard).unwrap(), Some(31));
    assert_eq!(store.get(Mode::Limited, Difficulty::Easy).unwrap(), None);
}

#[test]
fn test_set_replaces_previous_value() {
    let (_db, mut store) = setup_test_db();
    store.set(Mode::Basic, Difficulty::Easy, 40).unwrap();
    store.set(Mode::Basic, Difficulty::Easy, 22).unwrap();
    assert_eq!(store.get(Mode::Basic, Difficulty::Easy).unwrap(), Some(22));
    assert_eq!(store.rows().unwrap().len(), 1);
}

#[test]
fn test_values_stored_as_text_under_concatenated_key() {
    let (_db, mut store) = setup_test_db();
    store.set(Mode::Timed, Difficulty::Medium, 17).unwrap();
    let rows = store.rows().unwrap();
    assert_eq!(rows[0].key(), &score_key(Mode::Timed, Difficulty::Medium));
    assert_eq!(rows[0].key(), "timed_medium");
    assert_eq!(rows[0].value(), "17");
}

#[test]
fn test_records_survive_reopen() {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();

    {
        let mut store = SqliteScoreStore::open(&db_path).unwrap();
        store.set(Mode::Basic, Difficulty::Medium, 64).unwrap();
    }

    let mut store = SqliteScoreStore::open(&db_path).unwrap();
    assert_eq!(store.get(Mode::Basic, Difficulty::Medium).unwrap(), Some(64));
}

#[test]
fn test_clear_removes_everything() {
    let (_db, mut store) = setup_test_db();
    store.set(Mode::Basic, Difficulty::Easy, 1).unwrap();
    store.set(Mode::Timed, Difficulty::Hard, 2).unwrap();
    assert_eq!(store.clear().unwrap(), 2);
    assert!(best_scores(&mut store).iter().all(|(_, v)| v.is_none()));
}

#[test]
fn test_unparseable_memory_value_reads_as_absent() {
    let mut store = MemoryScoreStore::new();
    store.insert_raw("basic_easy", "quick");
    assert_eq!(store.get(Mode::Basic, Difficulty::Easy).unwrap(), None);
}

#[test]
fn test_memory_store_writes_text() {
    let mut store = MemoryScoreStore::new();
    store.set(Mode::Limited, Difficulty::Easy, 20).unwrap();
    assert_eq!(store.raw("limited_easy"), Some("20"));
}

#[test]
fn test_session_win_persists_to_sqlite() {
    let (_db, store) = setup_test_db();
    let mut session = session_with_store(store);
    session
        .start(SessionConfig::new(Mode::Limited, Difficulty::Easy))
        .unwrap();
    for (a, b) in pairs(&session) {
        session.flip(a);
        session.flip(b);
    }

    assert_eq!(
        session.sink().last_summary().unwrap().best,
        BestResult::NewRecord
    );
    assert_eq!(
        session.store_mut().get(Mode::Limited, Difficulty::Easy).unwrap(),
        Some(6)
    );
    assert_eq!(session.best_score(Mode::Limited, Difficulty::Easy), Some(6));
}
