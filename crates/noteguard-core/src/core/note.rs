// crates/noteguard-core/src/core/note.rs
// ============================================================================
// Module: Noteguard Note Records
// Description: Note record plus create/edit inputs and field validation.
// Purpose: Define the single persistent entity owned by the core.
// Dependencies: crate::core::{identifiers, slug}, serde, thiserror
// ============================================================================

//! ## Overview
//! A note is a CRUD entity with no internal state machine: it exists or it
//! does not. [`Note`] is the persisted form; [`NoteDraft`] and [`NoteChange`]
//! are the create and edit inputs. Field validation lives here so the service
//! and any store share one rule set. The `author` field is set once at
//! creation and never changed by edits, regardless of who performs them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::identifiers::NoteId;
use crate::core::identifiers::UserId;
use crate::core::slug::SLUG_TAKEN_WARNING;
use crate::core::slug::Slug;
use crate::core::slug::SlugError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum note title length in characters.
pub const MAX_TITLE_LENGTH: usize = 100;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Field-level validation errors for note inputs.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Display output is the user-facing form message for the failing field.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Title is required.
    #[error("title must not be empty")]
    TitleMissing,
    /// Title exceeds the maximum length.
    #[error("title exceeds {MAX_TITLE_LENGTH} characters: {actual}")]
    TitleTooLong {
        /// Actual title length in characters.
        actual: usize,
    },
    /// Text is required.
    #[error("text must not be empty")]
    TextMissing,
    /// Supplied or derived slug violates the slug shape invariants.
    #[error("invalid slug: {0}")]
    SlugInvalid(#[from] SlugError),
    /// Slug is already used by another note.
    #[error("{slug}{SLUG_TAKEN_WARNING}")]
    SlugTaken {
        /// The conflicting slug.
        slug: Slug,
    },
}

// ============================================================================
// SECTION: Records
// ============================================================================

/// Persisted note record.
///
/// # Invariants
/// - `id` is assigned by the store on insert and never changes.
/// - `slug` is globally unique across all notes.
/// - `author` is immutable post-creation regardless of who edits the note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Note identifier.
    pub id: NoteId,
    /// Note title.
    pub title: String,
    /// Note body text.
    pub text: String,
    /// Unique URL-safe address.
    pub slug: Slug,
    /// User who created the note.
    pub author: UserId,
}

/// Validated insert payload handed to a store.
///
/// # Invariants
/// - Fields have passed [`validate_fields`] and the slug is final (derived
///   or explicit); only uniqueness remains to be enforced by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNote {
    /// Note title.
    pub title: String,
    /// Note body text.
    pub text: String,
    /// Unique URL-safe address.
    pub slug: Slug,
    /// User creating the note.
    pub author: UserId,
}

/// Create input as received from the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDraft {
    /// Note title.
    pub title: String,
    /// Note body text.
    pub text: String,
    /// Explicit slug; when absent the slug is derived from the title.
    #[serde(default)]
    pub slug: Option<Slug>,
}

/// Edit input as received from the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteChange {
    /// Replacement title.
    pub title: String,
    /// Replacement body text.
    pub text: String,
    /// Replacement slug; when absent the slug is re-derived from the title.
    #[serde(default)]
    pub slug: Option<Slug>,
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates the title and text fields shared by create and edit inputs.
///
/// # Errors
///
/// Returns [`ValidationError`] for an empty title, an over-long title, or
/// empty text.
pub fn validate_fields(title: &str, text: &str) -> Result<(), ValidationError> {
    if title.is_empty() {
        return Err(ValidationError::TitleMissing);
    }
    let length = title.chars().count();
    if length > MAX_TITLE_LENGTH {
        return Err(ValidationError::TitleTooLong {
            actual: length,
        });
    }
    if text.is_empty() {
        return Err(ValidationError::TextMissing);
    }
    Ok(())
}
