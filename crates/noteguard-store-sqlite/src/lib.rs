// crates/noteguard-store-sqlite/src/lib.rs
// ============================================================================
// Module: Noteguard SQLite Store Library
// Description: Public API surface for the SQLite-backed note store.
// Purpose: Expose the durable store, its configuration, and its errors.
// Dependencies: crate::store
// ============================================================================

//! ## Overview
//! Durable [`noteguard_core::NoteStore`] backed by `SQLite`. Slug uniqueness
//! is enforced by a unique index rather than an application-level pre-check,
//! so concurrent inserts carrying one slug resolve to exactly one row.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use store::SqliteNoteStore;
pub use store::SqliteStoreConfig;
pub use store::SqliteStoreError;
pub use store::SqliteStoreMode;
pub use store::SqliteSyncMode;
