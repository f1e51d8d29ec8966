// crates/noteguard-core/src/core/actor.rs
// ============================================================================
// Module: Noteguard Actor
// Description: Caller identity evaluated by every note operation.
// Purpose: Distinguish anonymous callers from authenticated users.
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! Every operation on the note collection is evaluated against an [`Actor`].
//! The core assumes nothing about sessions or transport; the external web
//! layer resolves its session into an actor before calling in. Anonymous
//! actors never reach the store: operations fail closed before any lookup.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::UserId;

// ============================================================================
// SECTION: Actor
// ============================================================================

/// Caller identity for note operations.
///
/// # Invariants
/// - Variants are stable and exhaustive for policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Actor {
    /// Caller without an authenticated session.
    Anonymous,
    /// Caller authenticated as the given user.
    User(UserId),
}

impl Actor {
    /// Returns the authenticated user identifier, if any.
    #[must_use]
    pub const fn user_id(self) -> Option<UserId> {
        match self {
            Self::Anonymous => None,
            Self::User(id) => Some(id),
        }
    }

    /// Returns whether the actor carries an authenticated identity.
    #[must_use]
    pub const fn is_authenticated(self) -> bool {
        matches!(self, Self::User(_))
    }
}

impl From<UserId> for Actor {
    fn from(value: UserId) -> Self {
        Self::User(value)
    }
}
