// crates/noteguard-core/tests/identifier_wire.rs
// ============================================================================
// Module: Identifier Wire-Form Tests
// Description: Serde and Display behavior of the identifier newtypes.
// Purpose: Validate transparent wire forms, non-zero enforcement, and the
//          opaque username type.
// ============================================================================

//! ## Overview
//! Wire-form tests for the identifier newtypes:
//! - `UserId`/`NoteId` serialize as bare numbers and reject zero
//! - `Username` serializes as a bare string and round-trips unchanged

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use noteguard_core::NoteId;
use noteguard_core::UserId;
use noteguard_core::Username;

/// Error type for test preconditions.
type TestResult = Result<(), Box<dyn std::error::Error>>;

#[test]
fn numeric_identifiers_serialize_as_bare_numbers() -> TestResult {
    let user = UserId::from_raw(1).ok_or("nonzero userid")?;
    let note = NoteId::from_raw(2).ok_or("nonzero noteid")?;
    assert_eq!(serde_json::to_string(&user)?, "1");
    assert_eq!(serde_json::to_string(&note)?, "2");
    let parsed: UserId = serde_json::from_str("1")?;
    assert_eq!(parsed, user);
    Ok(())
}

#[test]
fn numeric_identifiers_reject_zero() {
    assert!(UserId::from_raw(0).is_none());
    assert!(NoteId::from_raw(0).is_none());
    let parsed: Result<UserId, _> = serde_json::from_str("0");
    assert!(parsed.is_err());
}

#[test]
fn numeric_identifiers_display_their_raw_value() -> TestResult {
    let user = UserId::from_raw(7).ok_or("nonzero userid")?;
    assert_eq!(user.to_string(), "7");
    assert_eq!(user.get(), 7);
    Ok(())
}

#[test]
fn username_serializes_as_a_bare_string() -> TestResult {
    let name = Username::new("Автор");
    assert_eq!(serde_json::to_string(&name)?, "\"Автор\"");
    let parsed: Username = serde_json::from_str("\"Автор\"")?;
    assert_eq!(parsed, name);
    Ok(())
}

#[test]
fn username_is_opaque_and_unnormalized() {
    let name = Username::from("Другой пользователь");
    assert_eq!(name.as_str(), "Другой пользователь");
    assert_eq!(name.to_string(), "Другой пользователь");
    assert_eq!(Username::from(String::from("Автор")), Username::new("Автор"));
}
