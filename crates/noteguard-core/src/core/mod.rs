// crates/noteguard-core/src/core/mod.rs
// ============================================================================
// Module: Noteguard Core Types
// Description: Canonical note, actor, identifier, and slug types.
// Purpose: Group the data model shared by policy, service, and stores.
// Dependencies: crate::core::{actor, identifiers, note, slug}
// ============================================================================

//! ## Overview
//! Core types for the note data model. Records are plain serde structs;
//! invariants that require enforcement (slug shape, field bounds) live on
//! dedicated constructors and validation functions.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod actor;
pub mod identifiers;
pub mod note;
pub mod slug;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use actor::Actor;
pub use identifiers::NoteId;
pub use identifiers::UserId;
pub use identifiers::Username;
pub use note::MAX_TITLE_LENGTH;
pub use note::NewNote;
pub use note::Note;
pub use note::NoteChange;
pub use note::NoteDraft;
pub use note::ValidationError;
pub use note::validate_fields;
pub use slug::MAX_SLUG_LENGTH;
pub use slug::SLUG_TAKEN_WARNING;
pub use slug::Slug;
pub use slug::SlugError;
pub use slug::slugify;
