// crates/mcs-core/src/culture.rs
// ============================================================================
// Module: Culture Identifiers
// Description: Validated locale tags naming a language/region variant.
// Purpose: Provide a strongly typed culture identifier with a stable wire form.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! A [`CultureName`] is the identifier string of a culture (`en`, `ru-RU`,
//! `zh-Hans-CN`). The empty identifier names the invariant culture.
//! Identifiers are compared as exact strings; no case folding or
//! locale-hierarchy normalization happens here.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum identifier length in bytes.
pub const MAX_CULTURE_NAME_LENGTH: usize = 85;
/// Maximum length of a single `-`-separated subtag.
const MAX_SUBTAG_LENGTH: usize = 8;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Culture identifier validation errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CultureError {
    /// Identifier exceeds [`MAX_CULTURE_NAME_LENGTH`].
    #[error("culture identifier exceeds 85 bytes: {length}")]
    TooLong {
        /// Actual identifier length in bytes.
        length: usize,
    },
    /// Identifier contains an empty subtag (`en--US`, `-en`, `en-`).
    #[error("culture identifier `{raw}` contains an empty subtag")]
    EmptySubtag {
        /// Raw identifier text.
        raw: String,
    },
    /// A subtag is longer than eight characters.
    #[error("culture identifier `{raw}` has a subtag longer than 8 characters")]
    SubtagTooLong {
        /// Raw identifier text.
        raw: String,
    },
    /// Identifier contains a character outside `[A-Za-z0-9-]`.
    #[error("culture identifier `{raw}` contains invalid character `{character}`")]
    InvalidCharacter {
        /// Raw identifier text.
        raw: String,
        /// Offending character.
        character: char,
    },
    /// The primary language subtag is not alphabetic.
    #[error("culture identifier `{raw}` must start with an alphabetic language subtag")]
    InvalidLanguage {
        /// Raw identifier text.
        raw: String,
    },
}

// ============================================================================
// SECTION: Culture Name
// ============================================================================

/// Culture identifier.
///
/// # Invariants
/// - Either empty (invariant culture) or `-`-separated ASCII alphanumeric
///   subtags of 1..=8 characters, the first one alphabetic.
/// - At most [`MAX_CULTURE_NAME_LENGTH`] bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CultureName(String);

impl CultureName {
    /// Parses and validates a culture identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CultureError`] when the identifier is malformed.
    pub fn parse(raw: &str) -> Result<Self, CultureError> {
        validate(raw)?;
        Ok(Self(raw.to_string()))
    }

    /// Returns the invariant culture (empty identifier).
    #[must_use]
    pub const fn invariant() -> Self {
        Self(String::new())
    }

    /// Returns true for the invariant culture.
    #[must_use]
    pub fn is_invariant(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the parent culture by dropping the last subtag (`en-US` → `en`).
    ///
    /// Returns `None` for single-subtag and invariant identifiers.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.0.rfind('-').map(|idx| Self(self.0[.. idx].to_string()))
    }
}

impl fmt::Display for CultureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CultureName {
    type Err = CultureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CultureName {
    type Error = CultureError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        validate(&value)?;
        Ok(Self(value))
    }
}

impl From<CultureName> for String {
    fn from(value: CultureName) -> Self {
        value.0
    }
}

impl AsRef<str> for CultureName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Validates a raw identifier against the culture name grammar.
fn validate(raw: &str) -> Result<(), CultureError> {
    if raw.is_empty() {
        return Ok(());
    }
    if raw.len() > MAX_CULTURE_NAME_LENGTH {
        return Err(CultureError::TooLong {
            length: raw.len(),
        });
    }
    if let Some(character) = raw.chars().find(|ch| !ch.is_ascii_alphanumeric() && *ch != '-') {
        return Err(CultureError::InvalidCharacter {
            raw: raw.to_string(),
            character,
        });
    }
    for (idx, subtag) in raw.split('-').enumerate() {
        if subtag.is_empty() {
            return Err(CultureError::EmptySubtag {
                raw: raw.to_string(),
            });
        }
        if subtag.len() > MAX_SUBTAG_LENGTH {
            return Err(CultureError::SubtagTooLong {
                raw: raw.to_string(),
            });
        }
        if idx == 0 && !subtag.chars().all(|ch| ch.is_ascii_alphabetic()) {
            return Err(CultureError::InvalidLanguage {
                raw: raw.to_string(),
            });
        }
    }
    Ok(())
}
