// crates/noteguard-core/src/runtime/mod.rs
// ============================================================================
// Module: Noteguard Runtime
// Description: Access policy, note service, and in-memory store.
// Purpose: Group the rule engine built on top of the core types.
// Dependencies: crate::runtime::{policy, service, store}
// ============================================================================

//! ## Overview
//! Runtime helpers wire the access policy and the store seam into the five
//! note operations. The policy is a set of pure decision functions; the
//! service owns sequencing and error mapping.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod policy;
pub mod service;
pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use policy::AccessDecision;
pub use policy::collection_access;
pub use policy::login_redirect_target;
pub use policy::note_access;
pub use service::NoteError;
pub use service::NoteService;
pub use store::InMemoryNoteStore;
