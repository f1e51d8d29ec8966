// crates/noteguard-core/src/lib.rs
// ============================================================================
// Module: Noteguard Core Library
// Description: Public API surface for the Noteguard core.
// Purpose: Expose note types, store interfaces, and runtime helpers.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Noteguard core owns note records, enforces author-only visibility and
//! mutation, and generates/validates slugs. It is backend-agnostic and
//! integrates with persistence through explicit interfaces rather than
//! embedding into a web framework.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::*;

pub use interfaces::NoteStore;
pub use interfaces::StoreError;
pub use runtime::AccessDecision;
pub use runtime::InMemoryNoteStore;
pub use runtime::NoteError;
pub use runtime::NoteService;
pub use runtime::collection_access;
pub use runtime::login_redirect_target;
pub use runtime::note_access;
