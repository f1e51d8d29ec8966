// crates/noteguard-core/src/core/slug.rs
// ============================================================================
// Module: Noteguard Slug Engine
// Description: Validated slug newtype and deterministic slug derivation.
// Purpose: Provide URL-safe note addresses with transliteration from titles.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! A slug is the short, unique, URL-safe address of a note. Callers may
//! supply one explicitly; when absent it is derived from the note title by
//! [`slugify`]: Cyrillic characters are transliterated to Latin, everything
//! is lowercased, runs of other characters collapse into single hyphens, and
//! the result is truncated to [`MAX_SLUG_LENGTH`] bytes. Derivation is a pure
//! function; uniqueness is enforced separately by the store.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum slug length in bytes.
pub const MAX_SLUG_LENGTH: usize = 100;

/// User-facing suffix appended to a duplicate slug in validation messages.
///
/// The full message shown on the form is `<slug><SLUG_TAKEN_WARNING>`.
pub const SLUG_TAKEN_WARNING: &str =
    " - адрес уже существует, придумайте уникальное значение!";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Slug validation errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SlugError {
    /// Slug is empty (or the source title yields nothing slug-safe).
    #[error("slug must not be empty")]
    Empty,
    /// Slug exceeds the maximum length.
    #[error("slug exceeds {MAX_SLUG_LENGTH} bytes: {actual}")]
    TooLong {
        /// Actual slug length in bytes.
        actual: usize,
    },
    /// Slug contains a character outside the URL-safe alphabet.
    #[error("slug contains invalid character: {character:?}")]
    InvalidChar {
        /// Offending character.
        character: char,
    },
}

// ============================================================================
// SECTION: Slug
// ============================================================================

/// URL-safe note address.
///
/// # Invariants
/// - Non-empty, at most [`MAX_SLUG_LENGTH`] bytes.
/// - ASCII alphanumeric plus `-` and `_` only; mixed case is allowed for
///   explicitly supplied slugs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Creates a slug after validating the URL-safe invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SlugError`] when the value is empty, too long, or contains
    /// a character outside the slug alphabet.
    pub fn new(value: impl Into<String>) -> Result<Self, SlugError> {
        let value = value.into();
        if value.is_empty() {
            return Err(SlugError::Empty);
        }
        if value.len() > MAX_SLUG_LENGTH {
            return Err(SlugError::TooLong {
                actual: value.len(),
            });
        }
        if let Some(character) =
            value.chars().find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(SlugError::InvalidChar {
                character,
            });
        }
        Ok(Self(value))
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<String> for Slug {
    type Error = SlugError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Slug {
    type Error = SlugError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}

// ============================================================================
// SECTION: Slug Derivation
// ============================================================================

/// Derives a slug from a note title.
///
/// Transliterates Cyrillic to Latin, lowercases, collapses runs of other
/// characters into single hyphens, strips leading/trailing hyphens, and
/// truncates to [`MAX_SLUG_LENGTH`] bytes. Truncation may split a word; a
/// dangling hyphen left at the cut point is stripped.
///
/// # Errors
///
/// Returns [`SlugError::Empty`] when the title yields no slug-safe
/// characters at all.
pub fn slugify(title: &str) -> Result<Slug, SlugError> {
    let mut out = String::new();
    let mut pending_separator = false;
    for character in title.chars().flat_map(char::to_lowercase) {
        if character.is_ascii_alphanumeric() {
            if pending_separator {
                out.push('-');
                pending_separator = false;
            }
            out.push(character);
        } else if let Some(latin) = transliterate(character) {
            out_push(&mut out, latin, &mut pending_separator);
        } else {
            pending_separator = !out.is_empty();
        }
    }
    out.truncate(MAX_SLUG_LENGTH);
    while out.ends_with('-') {
        out.pop();
    }
    if out.is_empty() {
        return Err(SlugError::Empty);
    }
    Ok(Slug(out))
}

/// Appends mapped text, inserting a single hyphen for any pending separator run.
fn out_push(out: &mut String, mapped: &str, pending_separator: &mut bool) {
    if mapped.is_empty() {
        return;
    }
    if *pending_separator {
        out.push('-');
        *pending_separator = false;
    }
    out.push_str(mapped);
}

/// Maps a lowercase Cyrillic character to its Latin transliteration.
///
/// Returns `None` for characters outside the table; hard and soft signs map
/// to the empty string (dropped without acting as separators).
const fn transliterate(character: char) -> Option<&'static str> {
    Some(match character {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' | 'ё' | 'э' => "e",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "j",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "c",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ъ' | 'ь' => "",
        'ы' => "y",
        'ю' => "yu",
        'я' => "ya",
        _ => return None,
    })
}
