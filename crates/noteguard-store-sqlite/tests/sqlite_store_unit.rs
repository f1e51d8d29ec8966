// crates/noteguard-store-sqlite/tests/sqlite_store_unit.rs
// ============================================================================
// Module: SQLite Note Store Unit Tests
// Description: Targeted integrity tests for the SQLite note store.
// Purpose: Validate schema versioning, slug uniqueness under concurrency,
//          persistence across reopen, and corruption detection.
// ============================================================================

//! ## Overview
//! Unit-level tests for `SQLite` store integrity invariants:
//! - Path validation and schema version checks
//! - Unique slug constraint (sequential and racing inserts)
//! - Update semantics (own slug excluded, author column untouched)
//! - Persistence across close/reopen
//! - Fail-closed handling of tampered rows

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use std::path::Path;
use std::sync::Arc;
use std::sync::Barrier;
use std::thread;

use noteguard_core::NewNote;
use noteguard_core::Note;
use noteguard_core::NoteStore;
use noteguard_core::Slug;
use noteguard_core::StoreError;
use noteguard_core::UserId;
use noteguard_store_sqlite::SqliteNoteStore;
use noteguard_store_sqlite::SqliteStoreConfig;
use noteguard_store_sqlite::SqliteStoreError;

/// Error type for test preconditions.
type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Returns the author fixture user.
fn author() -> UserId {
    UserId::from_raw(1).unwrap()
}

/// Builds an insert payload with the given slug.
fn new_note(slug: &str) -> NewNote {
    NewNote {
        title: "Заголовок".to_string(),
        text: "Текст".to_string(),
        slug: Slug::new(slug).unwrap(),
        author: author(),
    }
}

/// Opens a store on a fresh database under the given directory.
fn open_store(dir: &Path) -> Result<SqliteNoteStore, SqliteStoreError> {
    SqliteNoteStore::new(&SqliteStoreConfig::for_path(dir.join("notes.db")))
}

#[test]
fn rejects_directory_paths() -> TestResult {
    let dir = tempfile::tempdir()?;
    let config = SqliteStoreConfig::for_path(dir.path());
    let result = SqliteNoteStore::new(&config);
    assert!(matches!(result, Err(SqliteStoreError::Invalid(_))));
    Ok(())
}

#[test]
fn insert_assigns_sequential_identifiers() -> TestResult {
    let dir = tempfile::tempdir()?;
    let store = open_store(dir.path())?;
    let first = store.insert(&new_note("first"))?;
    let second = store.insert(&new_note("second"))?;
    assert!(second.id > first.id);
    assert_eq!(store.count()?, 2);
    Ok(())
}

#[test]
fn duplicate_slug_insert_fails_and_keeps_one_row() -> TestResult {
    let dir = tempfile::tempdir()?;
    let store = open_store(dir.path())?;
    store.insert(&new_note("slug"))?;
    let result = store.insert(&new_note("slug"));
    match result {
        Err(StoreError::SlugTaken {
            slug,
        }) => assert_eq!(slug.as_str(), "slug"),
        other => panic!("expected slug conflict, got {other:?}"),
    }
    assert_eq!(store.count()?, 1);
    Ok(())
}

#[test]
fn racing_inserts_with_one_slug_yield_exactly_one_row() -> TestResult {
    let dir = tempfile::tempdir()?;
    let store = open_store(dir.path())?;
    let barrier = Arc::new(Barrier::new(2));
    let mut handles = Vec::new();
    for _ in 0 .. 2 {
        let store = store.clone();
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            store.insert(&new_note("contended"))
        }));
    }
    let outcomes: Vec<_> =
        handles.into_iter().map(|handle| handle.join().expect("insert thread")).collect();
    let successes = outcomes.iter().filter(|outcome| outcome.is_ok()).count();
    let conflicts = outcomes
        .iter()
        .filter(|outcome| matches!(outcome, Err(StoreError::SlugTaken { .. })))
        .count();
    assert_eq!(successes, 1);
    assert_eq!(conflicts, 1);
    assert_eq!(store.count()?, 1);
    Ok(())
}

#[test]
fn update_excludes_the_notes_own_slug_from_the_constraint() -> TestResult {
    let dir = tempfile::tempdir()?;
    let store = open_store(dir.path())?;
    let note = store.insert(&new_note("keep"))?;
    let updated = Note {
        text: "Новый текст".to_string(),
        ..note
    };
    store.update(&updated)?;
    let fetched = store.get_by_slug(&Slug::new("keep")?)?.ok_or("note missing")?;
    assert_eq!(fetched.text, "Новый текст");
    Ok(())
}

#[test]
fn update_to_a_taken_slug_is_a_conflict() -> TestResult {
    let dir = tempfile::tempdir()?;
    let store = open_store(dir.path())?;
    store.insert(&new_note("taken"))?;
    let victim = store.insert(&new_note("victim"))?;
    let moved = Note {
        slug: Slug::new("taken")?,
        ..victim
    };
    let result = store.update(&moved);
    assert!(matches!(result, Err(StoreError::SlugTaken { .. })));
    assert!(store.get_by_slug(&Slug::new("victim")?)?.is_some());
    Ok(())
}

#[test]
fn update_of_an_unknown_id_is_invalid() -> TestResult {
    let dir = tempfile::tempdir()?;
    let store = open_store(dir.path())?;
    let note = store.insert(&new_note("only"))?;
    store.delete(note.id)?;
    let result = store.update(&note);
    assert!(matches!(result, Err(StoreError::Invalid(_))));
    Ok(())
}

#[test]
fn delete_removes_the_row_permanently() -> TestResult {
    let dir = tempfile::tempdir()?;
    let store = open_store(dir.path())?;
    let note = store.insert(&new_note("gone"))?;
    store.delete(note.id)?;
    assert!(!store.exists(note.id)?);
    assert!(store.get_by_slug(&Slug::new("gone")?)?.is_none());
    assert!(matches!(store.delete(note.id), Err(StoreError::Invalid(_))));
    Ok(())
}

#[test]
fn list_by_author_is_in_creation_order_and_scoped() -> TestResult {
    let dir = tempfile::tempdir()?;
    let store = open_store(dir.path())?;
    let other = UserId::from_raw(2).ok_or("nonzero userid")?;
    store.insert(&new_note("a"))?;
    store.insert(&NewNote {
        author: other,
        ..new_note("b")
    })?;
    store.insert(&new_note("c"))?;
    let listed = store.list_by_author(author())?;
    let slugs: Vec<_> = listed.iter().map(|note| note.slug.as_str()).collect();
    assert_eq!(slugs, ["a", "c"]);
    assert!(listed.iter().all(|note| note.author == author()));
    Ok(())
}

#[test]
fn notes_survive_close_and_reopen() -> TestResult {
    let dir = tempfile::tempdir()?;
    {
        let store = open_store(dir.path())?;
        store.insert(&new_note("durable"))?;
    }
    let reopened = open_store(dir.path())?;
    let note = reopened.get_by_slug(&Slug::new("durable")?)?.ok_or("note missing")?;
    assert_eq!(note.title, "Заголовок");
    assert_eq!(note.author, author());
    assert_eq!(reopened.count()?, 1);
    Ok(())
}

#[test]
fn incompatible_schema_version_fails_closed() -> TestResult {
    let dir = tempfile::tempdir()?;
    let db_path = dir.path().join("notes.db");
    {
        let store = SqliteNoteStore::new(&SqliteStoreConfig::for_path(&db_path))?;
        store.readiness()?;
    }
    let raw = rusqlite::Connection::open(&db_path)?;
    raw.execute("UPDATE schema_meta SET version = 99 WHERE id = 1", [])?;
    drop(raw);
    let result = SqliteNoteStore::new(&SqliteStoreConfig::for_path(&db_path));
    assert!(matches!(result, Err(SqliteStoreError::VersionMismatch(_))));
    Ok(())
}

#[test]
fn tampered_slug_rows_fail_closed_on_load() -> TestResult {
    let dir = tempfile::tempdir()?;
    let db_path = dir.path().join("notes.db");
    let store = SqliteNoteStore::new(&SqliteStoreConfig::for_path(&db_path))?;
    store.insert(&new_note("honest"))?;
    let raw = rusqlite::Connection::open(&db_path)?;
    raw.execute("UPDATE notes SET slug = 'not a slug' WHERE slug = 'honest'", [])?;
    drop(raw);
    let result = store.get_by_slug(&Slug::new("not-a-slug")?);
    assert!(result.is_ok());
    let listed = store.list_by_author(author());
    assert!(matches!(listed, Err(StoreError::Corrupt(_))));
    Ok(())
}

#[test]
fn config_deserializes_with_defaults() -> TestResult {
    let config: SqliteStoreConfig = serde_json::from_str(r#"{"path": "/tmp/notes.db"}"#)?;
    assert_eq!(config.busy_timeout_ms, 5_000);
    assert_eq!(config.journal_mode, noteguard_store_sqlite::SqliteStoreMode::Wal);
    assert_eq!(config.sync_mode, noteguard_store_sqlite::SqliteSyncMode::Full);
    Ok(())
}
