// crates/noteguard-core/examples/minimal.rs
// ============================================================================
// Module: Noteguard Minimal Example
// Description: Minimal end-to-end note lifecycle using the in-memory store.
// Purpose: Demonstrate create/list/edit/delete with slug auto-generation.
// Dependencies: noteguard-core
// ============================================================================

//! ## Overview
//! Runs a minimal note lifecycle using the in-memory store. This example is
//! backend-agnostic and suitable for quick verification.

#![allow(
    clippy::print_stdout,
    clippy::use_debug,
    reason = "Example output is printed for inspection."
)]

use noteguard_core::Actor;
use noteguard_core::InMemoryNoteStore;
use noteguard_core::NoteChange;
use noteguard_core::NoteDraft;
use noteguard_core::NoteService;
use noteguard_core::NoteStore;
use noteguard_core::Slug;
use noteguard_core::UserId;

/// Creates, edits, and deletes a note as a single author.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let author = UserId::from_raw(1)
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::InvalidInput, "nonzero userid"))?;
    let service = NoteService::new(InMemoryNoteStore::new());

    let note = service.create_note(
        Actor::User(author),
        &NoteDraft {
            title: "Заголовок".to_string(),
            text: "Текст".to_string(),
            slug: None,
        },
    )?;
    println!("created note {} with slug {}", note.id, note.slug);

    let listed = service.list_notes(Actor::User(author))?;
    println!("author has {} note(s)", listed.len());

    let edited = service.edit_note(
        Actor::User(author),
        &note.slug,
        &NoteChange {
            title: "Новый заголовок".to_string(),
            text: "Новый текст".to_string(),
            slug: Some(Slug::new("new-slug")?),
        },
    )?;
    println!("edited note now addressed as {}", edited.slug);

    service.delete_note(Actor::User(author), &edited.slug)?;
    println!("deleted; {} note(s) remain", service.store().count()?);
    Ok(())
}
