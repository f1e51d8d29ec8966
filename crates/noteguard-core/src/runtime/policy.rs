// crates/noteguard-core/src/runtime/policy.rs
// ============================================================================
// Module: Noteguard Access Policy
// Description: Pure access decisions for note and collection operations.
// Purpose: Enforce author-only visibility with ownership hidden as not-found.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Access decisions are pure functions over the actor and the note's author.
//! A non-author is told the note does not exist, not that it is forbidden:
//! routing "not owner" and "missing" through one outcome keeps the existence
//! of other users' notes undisclosed. Anonymous callers are redirected to a
//! login entry point for every note-scoped and collection operation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::Actor;
use crate::core::UserId;

// ============================================================================
// SECTION: Access Decisions
// ============================================================================

/// Outcome of an access policy check.
///
/// # Invariants
/// - Variants are stable and exhaustive for authorization outcomes.
/// - `NotFound` covers both "missing" and "not owner"; callers must not be
///   able to distinguish the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessDecision {
    /// The operation may proceed.
    Granted,
    /// The note is reported as nonexistent to this actor.
    NotFound,
    /// The caller must authenticate first.
    LoginRedirect,
}

/// Decides access to a single note (detail, edit, delete).
#[must_use]
pub fn note_access(actor: Actor, author: UserId) -> AccessDecision {
    match actor.user_id() {
        None => AccessDecision::LoginRedirect,
        Some(user) if user == author => AccessDecision::Granted,
        Some(_) => AccessDecision::NotFound,
    }
}

/// Decides access to collection-level operations (list, add, success page).
#[must_use]
pub fn collection_access(actor: Actor) -> AccessDecision {
    if actor.is_authenticated() {
        AccessDecision::Granted
    } else {
        AccessDecision::LoginRedirect
    }
}

/// Builds the redirect target for an unauthenticated caller.
///
/// The external web layer supplies its login URL and the originally
/// requested URL; the result is `<login_url>?next=<original_url>`.
#[must_use]
pub fn login_redirect_target(login_url: &str, next_url: &str) -> String {
    format!("{login_url}?next={next_url}")
}
