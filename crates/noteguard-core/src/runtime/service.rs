// crates/noteguard-core/src/runtime/service.rs
// ============================================================================
// Module: Noteguard Note Service
// Description: The five note operations wired over policy and store.
// Purpose: Sequence validation, slug derivation, policy, and persistence.
// Dependencies: crate::{core, interfaces, runtime::policy}
// ============================================================================

//! ## Overview
//! [`NoteService`] is the operation surface consumed by the external web
//! layer. Every operation checks the actor before touching the store, so a
//! denied request never mutates anything and a failed edit or delete leaves
//! every field exactly as it was. Slug uniqueness failures come back from
//! the store's atomic constraint and are mapped to the field-level
//! validation error the form redisplays.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::Actor;
use crate::core::NewNote;
use crate::core::Note;
use crate::core::NoteChange;
use crate::core::NoteDraft;
use crate::core::Slug;
use crate::core::UserId;
use crate::core::ValidationError;
use crate::core::slugify;
use crate::core::validate_fields;
use crate::interfaces::NoteStore;
use crate::interfaces::StoreError;
use crate::runtime::policy::AccessDecision;
use crate::runtime::policy::collection_access;
use crate::runtime::policy::note_access;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Note operation errors.
///
/// # Invariants
/// - `NotFound` covers both a missing slug and another user's note; the two
///   cases are indistinguishable to the caller.
/// - `Unauthenticated` is returned before any store access.
#[derive(Debug, Error)]
pub enum NoteError {
    /// Caller has no authenticated session; redirect to login.
    #[error("authentication required")]
    Unauthenticated,
    /// The note does not exist for this actor.
    #[error("note not found")]
    NotFound,
    /// A field failed validation; redisplay the form.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The store failed.
    #[error(transparent)]
    Store(StoreError),
}

/// Maps store failures into operation errors.
///
/// Uniqueness conflicts become the field-level validation error; everything
/// else passes through as a store failure.
fn map_store_error(error: StoreError) -> NoteError {
    match error {
        StoreError::SlugTaken {
            slug,
        } => NoteError::Validation(ValidationError::SlugTaken {
            slug,
        }),
        other => NoteError::Store(other),
    }
}

/// Applies the collection-level access policy and resolves the acting user.
///
/// Denials are produced before any store access.
fn authorize_collection(actor: Actor) -> Result<UserId, NoteError> {
    match collection_access(actor) {
        AccessDecision::Granted => actor.user_id().ok_or(NoteError::Unauthenticated),
        AccessDecision::NotFound | AccessDecision::LoginRedirect => {
            Err(NoteError::Unauthenticated)
        }
    }
}

// ============================================================================
// SECTION: Note Service
// ============================================================================

/// Operation surface over a note store.
#[derive(Debug, Clone)]
pub struct NoteService<S> {
    /// Note store implementation.
    store: S,
}

impl<S> NoteService<S>
where
    S: NoteStore,
{
    /// Creates a service over the given store.
    pub const fn new(store: S) -> Self {
        Self {
            store,
        }
    }

    /// Returns a reference to the underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Lists all notes authored by the actor, in creation order.
    ///
    /// A user with no notes receives an empty list. Other users' notes are
    /// never included.
    ///
    /// # Errors
    ///
    /// Returns [`NoteError::Unauthenticated`] for anonymous callers, or a
    /// store failure.
    pub fn list_notes(&self, actor: Actor) -> Result<Vec<Note>, NoteError> {
        let user = authorize_collection(actor)?;
        self.store.list_by_author(user).map_err(map_store_error)
    }

    /// Creates a note owned by the actor.
    ///
    /// When the draft carries no slug, one is derived from the title. An
    /// anonymous attempt fails before anything is persisted.
    ///
    /// # Errors
    ///
    /// Returns [`NoteError::Unauthenticated`] for anonymous callers,
    /// [`NoteError::Validation`] for field or slug-uniqueness failures, or a
    /// store failure.
    pub fn create_note(&self, actor: Actor, draft: &NoteDraft) -> Result<Note, NoteError> {
        let user = authorize_collection(actor)?;
        validate_fields(&draft.title, &draft.text)?;
        let slug = final_slug(draft.slug.as_ref(), &draft.title)?;
        let new_note = NewNote {
            title: draft.title.clone(),
            text: draft.text.clone(),
            slug,
            author: user,
        };
        self.store.insert(&new_note).map_err(map_store_error)
    }

    /// Fetches a note by slug for its author.
    ///
    /// # Errors
    ///
    /// Returns [`NoteError::Unauthenticated`] for anonymous callers,
    /// [`NoteError::NotFound`] when the slug is missing or the note belongs
    /// to another user, or a store failure.
    pub fn get_note(&self, actor: Actor, slug: &Slug) -> Result<Note, NoteError> {
        if !actor.is_authenticated() {
            return Err(NoteError::Unauthenticated);
        }
        let note =
            self.store.get_by_slug(slug).map_err(map_store_error)?.ok_or(NoteError::NotFound)?;
        match note_access(actor, note.author) {
            AccessDecision::Granted => Ok(note),
            AccessDecision::NotFound => Err(NoteError::NotFound),
            AccessDecision::LoginRedirect => Err(NoteError::Unauthenticated),
        }
    }

    /// Replaces the title, text, and slug of the actor's note.
    ///
    /// The author field is never touched. The note's own current slug does
    /// not count as a conflict. On any failure the stored note is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`NoteError::Unauthenticated`] for anonymous callers,
    /// [`NoteError::NotFound`] when the slug is missing or the note belongs
    /// to another user, [`NoteError::Validation`] for field or
    /// slug-uniqueness failures, or a store failure.
    pub fn edit_note(
        &self,
        actor: Actor,
        slug: &Slug,
        change: &NoteChange,
    ) -> Result<Note, NoteError> {
        let current = self.get_note(actor, slug)?;
        validate_fields(&change.title, &change.text)?;
        let new_slug = final_slug(change.slug.as_ref(), &change.title)?;
        let updated = Note {
            id: current.id,
            title: change.title.clone(),
            text: change.text.clone(),
            slug: new_slug,
            author: current.author,
        };
        self.store.update(&updated).map_err(map_store_error)?;
        Ok(updated)
    }

    /// Permanently removes the actor's note.
    ///
    /// # Errors
    ///
    /// Returns [`NoteError::Unauthenticated`] for anonymous callers,
    /// [`NoteError::NotFound`] when the slug is missing or the note belongs
    /// to another user, or a store failure.
    pub fn delete_note(&self, actor: Actor, slug: &Slug) -> Result<(), NoteError> {
        let note = self.get_note(actor, slug)?;
        self.store.delete(note.id).map_err(map_store_error)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the final slug for a create or edit input.
///
/// An explicit slug is used as-is; an absent one is derived from the title.
fn final_slug(explicit: Option<&Slug>, title: &str) -> Result<Slug, ValidationError> {
    match explicit {
        Some(slug) => Ok(slug.clone()),
        None => Ok(slugify(title)?),
    }
}
