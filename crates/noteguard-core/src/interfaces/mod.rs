// crates/noteguard-core/src/interfaces/mod.rs
// ============================================================================
// Module: Noteguard Interfaces
// Description: Backend-agnostic storage interface for note records.
// Purpose: Define the contract surface between the note service and stores.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The store interface is the sole write path to the note collection. All
//! mutations flow through [`NoteStore`] implementations, which must enforce
//! slug uniqueness atomically: two concurrent inserts carrying the same slug
//! result in exactly one success and one [`StoreError::SlugTaken`], never two
//! rows. An application-level read-then-write pre-check is not sufficient.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::NewNote;
use crate::core::Note;
use crate::core::NoteId;
use crate::core::Slug;
use crate::core::UserId;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Note store errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - `SlugTaken` is raised by the store's own atomic uniqueness constraint.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store I/O error.
    #[error("note store io error: {0}")]
    Io(String),
    /// Database engine error.
    #[error("note store db error: {0}")]
    Db(String),
    /// Store data is corrupted or fails integrity checks.
    #[error("note store corruption: {0}")]
    Corrupt(String),
    /// Store data version is incompatible.
    #[error("note store version mismatch: {0}")]
    VersionMismatch(String),
    /// Store data is invalid.
    #[error("note store invalid data: {0}")]
    Invalid(String),
    /// Slug is already used by another note.
    #[error("note store slug conflict: {slug}")]
    SlugTaken {
        /// The conflicting slug.
        slug: Slug,
    },
}

// ============================================================================
// SECTION: Note Store
// ============================================================================

/// Note store for persistence.
///
/// Implementations must make every mutation atomic with respect to the slug
/// uniqueness check: no observer may see a transient duplicate-slug state.
pub trait NoteStore {
    /// Inserts a new note and returns it with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::SlugTaken`] when the slug is already in use,
    /// or another [`StoreError`] when the insert fails.
    fn insert(&self, note: &NewNote) -> Result<Note, StoreError>;

    /// Loads a note by slug.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the lookup fails.
    fn get_by_slug(&self, slug: &Slug) -> Result<Option<Note>, StoreError>;

    /// Lists all notes created by the author, in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the query fails.
    fn list_by_author(&self, author: UserId) -> Result<Vec<Note>, StoreError>;

    /// Replaces the stored fields of the note identified by `note.id`.
    ///
    /// The note's own current slug never counts as a conflict: the
    /// uniqueness constraint excludes the row being updated.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::SlugTaken`] when the new slug belongs to
    /// another note, [`StoreError::Invalid`] when the identifier is unknown,
    /// or another [`StoreError`] when the update fails.
    fn update(&self, note: &Note) -> Result<(), StoreError>;

    /// Removes a note permanently.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Invalid`] when the identifier is unknown, or
    /// another [`StoreError`] when the delete fails.
    fn delete(&self, id: NoteId) -> Result<(), StoreError>;

    /// Returns whether a note with the identifier exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the query fails.
    fn exists(&self, id: NoteId) -> Result<bool, StoreError>;

    /// Returns the total number of stored notes across all authors.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the query fails.
    fn count(&self) -> Result<u64, StoreError>;

    /// Reports store readiness for liveness/readiness probes.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store is unavailable.
    fn readiness(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
