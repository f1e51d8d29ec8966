// crates/noteguard-store-sqlite/src/store.rs
// ============================================================================
// Module: SQLite Note Store
// Description: Durable NoteStore backed by SQLite.
// Purpose: Persist note records with slug uniqueness enforced by the engine.
// Dependencies: noteguard-core, rusqlite, serde, thiserror
// ============================================================================

//! ## Overview
//! This module implements a durable [`NoteStore`] using `SQLite`. The slug
//! column carries a unique index, so the uniqueness check and the mutation
//! are one atomic statement: two concurrent inserts with the same slug yield
//! exactly one row and one [`StoreError::SlugTaken`]. Loads validate stored
//! rows against the core invariants and fail closed on invalid data.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use noteguard_core::NewNote;
use noteguard_core::Note;
use noteguard_core::NoteId;
use noteguard_core::NoteStore;
use noteguard_core::Slug;
use noteguard_core::StoreError;
use noteguard_core::UserId;
use rusqlite::Connection;
use rusqlite::ErrorCode;
use rusqlite::OptionalExtension;
use rusqlite::params;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// `SQLite` schema version for the store.
const SCHEMA_VERSION: i64 = 1;
/// Default busy timeout (ms).
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

// ============================================================================
// SECTION: Config
// ============================================================================

/// `SQLite` journal mode configuration.
///
/// # Invariants
/// - Values map 1:1 to `SQLite` `journal_mode` pragma settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteStoreMode {
    /// WAL journal mode (recommended).
    #[default]
    Wal,
    /// Delete journal mode (legacy).
    Delete,
}

impl SqliteStoreMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Wal => "wal",
            Self::Delete => "delete",
        }
    }
}

/// `SQLite` sync mode configuration.
///
/// # Invariants
/// - Values map 1:1 to `SQLite` `synchronous` pragma settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteSyncMode {
    /// Full synchronous mode (safest).
    #[default]
    Full,
    /// Normal synchronous mode (balanced).
    Normal,
}

impl SqliteSyncMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Normal => "normal",
        }
    }
}

/// Configuration for the `SQLite` note store.
///
/// # Invariants
/// - `path` must resolve to a file path (not a directory).
/// - `busy_timeout_ms` is interpreted as milliseconds.
#[derive(Debug, Clone, Deserialize)]
pub struct SqliteStoreConfig {
    /// Path to the `SQLite` database file.
    pub path: PathBuf,
    /// Busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// `SQLite` journal mode.
    #[serde(default)]
    pub journal_mode: SqliteStoreMode,
    /// `SQLite` sync mode.
    #[serde(default)]
    pub sync_mode: SqliteSyncMode,
}

impl SqliteStoreConfig {
    /// Returns a configuration with defaults for the given database path.
    #[must_use]
    pub fn for_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            journal_mode: SqliteStoreMode::default(),
            sync_mode: SqliteSyncMode::default(),
        }
    }
}

/// Returns the default busy timeout for `SQLite` connections.
const fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// `SQLite` store errors.
///
/// # Invariants
/// - Error messages avoid embedding note bodies.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SqliteStoreError {
    /// Store I/O error.
    #[error("sqlite note store io error: {0}")]
    Io(String),
    /// `SQLite` engine error.
    #[error("sqlite note store db error: {0}")]
    Db(String),
    /// Stored data violates a core invariant.
    #[error("sqlite note store corruption: {0}")]
    Corrupt(String),
    /// Store schema version mismatch.
    #[error("sqlite note store version mismatch: {0}")]
    VersionMismatch(String),
    /// Invalid store data or request.
    #[error("sqlite note store invalid data: {0}")]
    Invalid(String),
    /// Slug is already used by another note.
    #[error("sqlite note store slug conflict: {slug}")]
    SlugTaken {
        /// The conflicting slug.
        slug: Slug,
    },
}

impl From<SqliteStoreError> for StoreError {
    fn from(error: SqliteStoreError) -> Self {
        match error {
            SqliteStoreError::Io(message) => Self::Io(message),
            SqliteStoreError::Db(message) => Self::Db(message),
            SqliteStoreError::Corrupt(message) => Self::Corrupt(message),
            SqliteStoreError::VersionMismatch(message) => Self::VersionMismatch(message),
            SqliteStoreError::Invalid(message) => Self::Invalid(message),
            SqliteStoreError::SlugTaken {
                slug,
            } => Self::SlugTaken {
                slug,
            },
        }
    }
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// `SQLite`-backed note store.
///
/// # Invariants
/// - Slug uniqueness is enforced by a unique index, not a pre-check.
/// - `SQLite` connection access is serialized through a mutex.
#[derive(Debug, Clone)]
pub struct SqliteNoteStore {
    /// Shared connection guarded by a mutex.
    connection: Arc<Mutex<Connection>>,
}

impl SqliteNoteStore {
    /// Opens an `SQLite`-backed note store.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the database cannot be opened or
    /// initialized, or when an existing file carries an incompatible schema
    /// version.
    pub fn new(config: &SqliteStoreConfig) -> Result<Self, SqliteStoreError> {
        validate_store_path(&config.path)?;
        ensure_parent_dir(&config.path)?;
        let connection = open_connection(config)?;
        initialize_schema(&connection)?;
        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    /// Locks the connection, surfacing poisoning as a store error.
    fn lock(&self) -> Result<MutexGuard<'_, Connection>, SqliteStoreError> {
        self.connection
            .lock()
            .map_err(|_| SqliteStoreError::Db("sqlite connection mutex poisoned".to_string()))
    }

    /// Inserts a note row and returns the stored record.
    fn insert_note(&self, note: &NewNote) -> Result<Note, SqliteStoreError> {
        let author = encode_user_id(note.author)?;
        let guard = self.lock()?;
        guard
            .execute(
                "INSERT INTO notes (title, text, slug, author) VALUES (?1, ?2, ?3, ?4)",
                params![note.title, note.text, note.slug.as_str(), author],
            )
            .map_err(|err| classify_write_error(&err, &note.slug))?;
        let id = decode_note_id(guard.last_insert_rowid())?;
        Ok(Note {
            id,
            title: note.title.clone(),
            text: note.text.clone(),
            slug: note.slug.clone(),
            author: note.author,
        })
    }

    /// Loads a note row by slug.
    fn fetch_by_slug(&self, slug: &Slug) -> Result<Option<Note>, SqliteStoreError> {
        let guard = self.lock()?;
        let row = guard
            .query_row(
                "SELECT id, title, text, slug, author FROM notes WHERE slug = ?1",
                params![slug.as_str()],
                read_note_row,
            )
            .optional()
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        row.map(build_note).transpose()
    }

    /// Lists note rows for an author in creation order.
    fn fetch_by_author(&self, author: UserId) -> Result<Vec<Note>, SqliteStoreError> {
        let author = encode_user_id(author)?;
        let guard = self.lock()?;
        let mut stmt = guard
            .prepare(
                "SELECT id, title, text, slug, author FROM notes WHERE author = ?1 ORDER BY id",
            )
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        let rows = stmt
            .query_map(params![author], read_note_row)
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        let mut notes = Vec::new();
        for row in rows {
            let row = row.map_err(|err| SqliteStoreError::Db(err.to_string()))?;
            notes.push(build_note(row)?);
        }
        Ok(notes)
    }

    /// Replaces the mutable fields of a stored note.
    ///
    /// The author column is deliberately absent from the update statement;
    /// ownership cannot change through this store.
    fn update_note(&self, note: &Note) -> Result<(), SqliteStoreError> {
        let id = encode_note_id(note.id);
        let guard = self.lock()?;
        let affected = guard
            .execute(
                "UPDATE notes SET title = ?1, text = ?2, slug = ?3 WHERE id = ?4",
                params![note.title, note.text, note.slug.as_str(), id],
            )
            .map_err(|err| classify_write_error(&err, &note.slug))?;
        if affected == 0 {
            return Err(SqliteStoreError::Invalid(format!("unknown note id: {}", note.id)));
        }
        Ok(())
    }

    /// Removes a note row permanently.
    fn delete_note(&self, id: NoteId) -> Result<(), SqliteStoreError> {
        let guard = self.lock()?;
        let affected = guard
            .execute("DELETE FROM notes WHERE id = ?1", params![encode_note_id(id)])
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        if affected == 0 {
            return Err(SqliteStoreError::Invalid(format!("unknown note id: {id}")));
        }
        Ok(())
    }

    /// Returns whether a note row exists.
    fn note_exists(&self, id: NoteId) -> Result<bool, SqliteStoreError> {
        let guard = self.lock()?;
        guard
            .query_row(
                "SELECT 1 FROM notes WHERE id = ?1",
                params![encode_note_id(id)],
                |_| Ok(()),
            )
            .optional()
            .map(|found| found.is_some())
            .map_err(|err| SqliteStoreError::Db(err.to_string()))
    }

    /// Counts stored note rows.
    fn count_notes(&self) -> Result<u64, SqliteStoreError> {
        let guard = self.lock()?;
        let count: i64 = guard
            .query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        u64::try_from(count)
            .map_err(|_| SqliteStoreError::Corrupt("negative note count".to_string()))
    }

    /// Verifies the store can execute a simple SQL statement.
    fn check_connection(&self) -> Result<(), SqliteStoreError> {
        let guard = self.lock()?;
        guard
            .query_row("SELECT 1", [], |_| Ok(()))
            .map_err(|err| SqliteStoreError::Db(err.to_string()))
    }
}

impl NoteStore for SqliteNoteStore {
    fn insert(&self, note: &NewNote) -> Result<Note, StoreError> {
        self.insert_note(note).map_err(StoreError::from)
    }

    fn get_by_slug(&self, slug: &Slug) -> Result<Option<Note>, StoreError> {
        self.fetch_by_slug(slug).map_err(StoreError::from)
    }

    fn list_by_author(&self, author: UserId) -> Result<Vec<Note>, StoreError> {
        self.fetch_by_author(author).map_err(StoreError::from)
    }

    fn update(&self, note: &Note) -> Result<(), StoreError> {
        self.update_note(note).map_err(StoreError::from)
    }

    fn delete(&self, id: NoteId) -> Result<(), StoreError> {
        self.delete_note(id).map_err(StoreError::from)
    }

    fn exists(&self, id: NoteId) -> Result<bool, StoreError> {
        self.note_exists(id).map_err(StoreError::from)
    }

    fn count(&self) -> Result<u64, StoreError> {
        self.count_notes().map_err(StoreError::from)
    }

    fn readiness(&self) -> Result<(), StoreError> {
        self.check_connection().map_err(StoreError::from)
    }
}

// ============================================================================
// SECTION: Row Mapping
// ============================================================================

/// Raw note row as stored in `SQLite`.
struct NoteRow {
    /// Row identifier.
    id: i64,
    /// Note title.
    title: String,
    /// Note body text.
    text: String,
    /// Stored slug text.
    slug: String,
    /// Stored author identifier.
    author: i64,
}

/// Reads a note row from a query result.
fn read_note_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<NoteRow> {
    Ok(NoteRow {
        id: row.get(0)?,
        title: row.get(1)?,
        text: row.get(2)?,
        slug: row.get(3)?,
        author: row.get(4)?,
    })
}

/// Validates a raw row against the core invariants.
fn build_note(row: NoteRow) -> Result<Note, SqliteStoreError> {
    let id = decode_note_id(row.id)?;
    let slug = Slug::new(row.slug)
        .map_err(|err| SqliteStoreError::Corrupt(format!("stored slug invalid: {err}")))?;
    let author = u64::try_from(row.author)
        .ok()
        .and_then(UserId::from_raw)
        .ok_or_else(|| SqliteStoreError::Corrupt(format!("stored author invalid: {}", row.author)))?;
    Ok(Note {
        id,
        title: row.title,
        text: row.text,
        slug,
        author,
    })
}

/// Converts a rowid into a note identifier.
fn decode_note_id(raw: i64) -> Result<NoteId, SqliteStoreError> {
    u64::try_from(raw)
        .ok()
        .and_then(NoteId::from_raw)
        .ok_or_else(|| SqliteStoreError::Corrupt(format!("stored note id invalid: {raw}")))
}

/// Converts a note identifier into its rowid form.
#[allow(
    clippy::cast_possible_wrap,
    reason = "Identifiers originate from rowids, which fit in i64."
)]
const fn encode_note_id(id: NoteId) -> i64 {
    id.get() as i64
}

/// Converts a user identifier into its column form.
fn encode_user_id(id: UserId) -> Result<i64, SqliteStoreError> {
    i64::try_from(id.get())
        .map_err(|_| SqliteStoreError::Invalid(format!("user id exceeds column range: {id}")))
}

/// Classifies a write failure, mapping unique-constraint hits to `SlugTaken`.
fn classify_write_error(error: &rusqlite::Error, slug: &Slug) -> SqliteStoreError {
    if let rusqlite::Error::SqliteFailure(failure, _) = error
        && failure.code == ErrorCode::ConstraintViolation
    {
        return SqliteStoreError::SlugTaken {
            slug: slug.clone(),
        };
    }
    SqliteStoreError::Db(error.to_string())
}

// ============================================================================
// SECTION: Initialization
// ============================================================================

/// Rejects paths that cannot hold a database file.
fn validate_store_path(path: &Path) -> Result<(), SqliteStoreError> {
    if path.as_os_str().is_empty() {
        return Err(SqliteStoreError::Invalid("store path must not be empty".to_string()));
    }
    if path.is_dir() {
        return Err(SqliteStoreError::Invalid(format!(
            "store path is a directory: {}",
            path.display()
        )));
    }
    Ok(())
}

/// Creates the parent directory for the database file when missing.
fn ensure_parent_dir(path: &Path) -> Result<(), SqliteStoreError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|err| SqliteStoreError::Io(err.to_string()))?;
    }
    Ok(())
}

/// Opens a connection and applies the configured pragmas.
fn open_connection(config: &SqliteStoreConfig) -> Result<Connection, SqliteStoreError> {
    let connection =
        Connection::open(&config.path).map_err(|err| SqliteStoreError::Io(err.to_string()))?;
    let busy_timeout_ms = i64::try_from(config.busy_timeout_ms)
        .map_err(|_| SqliteStoreError::Invalid("busy_timeout_ms out of range".to_string()))?;
    connection
        .pragma_update(None, "busy_timeout", busy_timeout_ms)
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    connection
        .pragma_update(None, "journal_mode", config.journal_mode.pragma_value())
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    connection
        .pragma_update(None, "synchronous", config.sync_mode.pragma_value())
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    Ok(connection)
}

/// Creates tables on first open and validates the schema version after.
fn initialize_schema(connection: &Connection) -> Result<(), SqliteStoreError> {
    connection
        .execute_batch(
            "CREATE TABLE IF NOT EXISTS schema_meta (
                 id INTEGER PRIMARY KEY CHECK (id = 1),
                 version INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS notes (
                 id INTEGER PRIMARY KEY AUTOINCREMENT,
                 title TEXT NOT NULL,
                 text TEXT NOT NULL,
                 slug TEXT NOT NULL,
                 author INTEGER NOT NULL
             );
             CREATE UNIQUE INDEX IF NOT EXISTS idx_notes_slug ON notes (slug);
             CREATE INDEX IF NOT EXISTS idx_notes_author ON notes (author);",
        )
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    connection
        .execute(
            "INSERT OR IGNORE INTO schema_meta (id, version) VALUES (1, ?1)",
            params![SCHEMA_VERSION],
        )
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    let version: i64 = connection
        .query_row("SELECT version FROM schema_meta WHERE id = 1", [], |row| row.get(0))
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    if version != SCHEMA_VERSION {
        return Err(SqliteStoreError::VersionMismatch(format!(
            "found schema version {version}, expected {SCHEMA_VERSION}"
        )));
    }
    Ok(())
}
