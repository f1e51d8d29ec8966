// crates/noteguard-core/src/runtime/store.rs
// ============================================================================
// Module: Noteguard In-Memory Store
// Description: Simple in-memory note store for tests and examples.
// Purpose: Provide a deterministic store implementation without external deps.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! This module provides a simple in-memory implementation of [`NoteStore`]
//! for tests and local demos. It is not intended for production use. The
//! uniqueness check and the mutation happen under one lock acquisition, so
//! no observer sees a transient duplicate-slug state.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use crate::core::NewNote;
use crate::core::Note;
use crate::core::NoteId;
use crate::core::Slug;
use crate::core::UserId;
use crate::interfaces::NoteStore;
use crate::interfaces::StoreError;

// ============================================================================
// SECTION: In-Memory Store
// ============================================================================

/// Mutable map state behind the store mutex.
#[derive(Debug, Default)]
struct Inner {
    /// Notes keyed by raw note identifier, ascending creation order.
    notes: BTreeMap<u64, Note>,
    /// Last assigned raw note identifier.
    last_id: u64,
}

/// In-memory note store for tests and examples.
#[derive(Debug, Default, Clone)]
pub struct InMemoryNoteStore {
    /// Note map protected by a mutex.
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryNoteStore {
    /// Creates a new in-memory note store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the inner map, surfacing poisoning as a store error.
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>, StoreError> {
        self.inner.lock().map_err(|_| StoreError::Db("note store mutex poisoned".to_string()))
    }
}

impl NoteStore for InMemoryNoteStore {
    fn insert(&self, note: &NewNote) -> Result<Note, StoreError> {
        let mut guard = self.lock()?;
        if guard.notes.values().any(|existing| existing.slug == note.slug) {
            return Err(StoreError::SlugTaken {
                slug: note.slug.clone(),
            });
        }
        let raw_id = guard.last_id.checked_add(1).ok_or_else(|| {
            StoreError::Invalid("note identifier space exhausted".to_string())
        })?;
        let id = NoteId::from_raw(raw_id)
            .ok_or_else(|| StoreError::Invalid("note identifier must be non-zero".to_string()))?;
        let stored = Note {
            id,
            title: note.title.clone(),
            text: note.text.clone(),
            slug: note.slug.clone(),
            author: note.author,
        };
        guard.last_id = raw_id;
        guard.notes.insert(raw_id, stored.clone());
        Ok(stored)
    }

    fn get_by_slug(&self, slug: &Slug) -> Result<Option<Note>, StoreError> {
        let guard = self.lock()?;
        Ok(guard.notes.values().find(|note| note.slug == *slug).cloned())
    }

    fn list_by_author(&self, author: UserId) -> Result<Vec<Note>, StoreError> {
        let guard = self.lock()?;
        Ok(guard.notes.values().filter(|note| note.author == author).cloned().collect())
    }

    fn update(&self, note: &Note) -> Result<(), StoreError> {
        let mut guard = self.lock()?;
        if guard
            .notes
            .values()
            .any(|existing| existing.slug == note.slug && existing.id != note.id)
        {
            return Err(StoreError::SlugTaken {
                slug: note.slug.clone(),
            });
        }
        let raw_id = note.id.get();
        if !guard.notes.contains_key(&raw_id) {
            return Err(StoreError::Invalid(format!("unknown note id: {raw_id}")));
        }
        guard.notes.insert(raw_id, note.clone());
        Ok(())
    }

    fn delete(&self, id: NoteId) -> Result<(), StoreError> {
        let mut guard = self.lock()?;
        if guard.notes.remove(&id.get()).is_none() {
            return Err(StoreError::Invalid(format!("unknown note id: {id}")));
        }
        Ok(())
    }

    fn exists(&self, id: NoteId) -> Result<bool, StoreError> {
        let guard = self.lock()?;
        Ok(guard.notes.contains_key(&id.get()))
    }

    fn count(&self) -> Result<u64, StoreError> {
        let guard = self.lock()?;
        Ok(u64::try_from(guard.notes.len()).unwrap_or(u64::MAX))
    }
}
