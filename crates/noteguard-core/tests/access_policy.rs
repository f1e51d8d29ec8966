// crates/noteguard-core/tests/access_policy.rs
// ============================================================================
// Module: Access Policy Tests
// Description: Decision-table tests for note and collection access.
// Purpose: Validate the anonymous/non-author/author outcomes and the login
//          redirect target format.
// ============================================================================

//! ## Overview
//! Policy tests pin the access table consumed by the external web layer:
//! collection routes (list, add, success) grant any authenticated user and
//! redirect anonymous callers; note routes (detail, edit, delete) grant the
//! author, report not-found to everyone else, and redirect anonymous
//! callers to `<login_url>?next=<original_url>`.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use noteguard_core::AccessDecision;
use noteguard_core::Actor;
use noteguard_core::InMemoryNoteStore;
use noteguard_core::NoteDraft;
use noteguard_core::NoteError;
use noteguard_core::NoteService;
use noteguard_core::UserId;
use noteguard_core::collection_access;
use noteguard_core::login_redirect_target;
use noteguard_core::note_access;

/// Error type for test preconditions.
type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Returns the author fixture user.
fn author() -> UserId {
    UserId::from_raw(1).unwrap()
}

/// Returns the other-user fixture.
fn other_user() -> UserId {
    UserId::from_raw(2).unwrap()
}

#[test]
fn access_table_matches_route_contract() {
    // (actor, decision for collection routes, decision for note routes)
    let rows = [
        (Actor::Anonymous, AccessDecision::LoginRedirect, AccessDecision::LoginRedirect),
        (Actor::User(other_user()), AccessDecision::Granted, AccessDecision::NotFound),
        (Actor::User(author()), AccessDecision::Granted, AccessDecision::Granted),
    ];
    for (actor, collection, note) in rows {
        assert_eq!(collection_access(actor), collection, "collection access for {actor:?}");
        assert_eq!(note_access(actor, author()), note, "note access for {actor:?}");
    }
}

#[test]
fn non_author_outcome_equals_missing_note_outcome() {
    // Ownership must leak as not-found, never as a distinct forbidden state.
    let for_foreign_note = note_access(Actor::User(other_user()), author());
    assert_eq!(for_foreign_note, AccessDecision::NotFound);
}

#[test]
fn note_fetch_outcomes_agree_with_the_policy_table() -> TestResult {
    let service = NoteService::new(InMemoryNoteStore::new());
    let note = service.create_note(
        Actor::User(author()),
        &NoteDraft {
            title: "Заголовок".to_string(),
            text: "Текст".to_string(),
            slug: None,
        },
    )?;
    for actor in [Actor::Anonymous, Actor::User(other_user()), Actor::User(author())] {
        let outcome = service.get_note(actor, &note.slug);
        match note_access(actor, note.author) {
            AccessDecision::Granted => assert!(outcome.is_ok(), "author fetch for {actor:?}"),
            AccessDecision::NotFound => {
                assert!(matches!(outcome, Err(NoteError::NotFound)), "foreign fetch for {actor:?}");
            }
            AccessDecision::LoginRedirect => {
                assert!(
                    matches!(outcome, Err(NoteError::Unauthenticated)),
                    "anonymous fetch for {actor:?}"
                );
            }
        }
    }
    Ok(())
}

#[test]
fn login_redirect_carries_the_original_url() {
    assert_eq!(
        login_redirect_target("/auth/login/", "/notes/slug/edit/"),
        "/auth/login/?next=/notes/slug/edit/"
    );
    assert_eq!(login_redirect_target("/auth/login/", "/notes/"), "/auth/login/?next=/notes/");
}
