// crates/mcs-core/src/value.rs
// ============================================================================
// Module: Multicultural String
// Description: Insertion-ordered mapping from culture identifier to text.
// Purpose: Model the localized-string value stored in a single column.
// Dependencies: crate::{chain, culture, native, policy}
// ============================================================================

//! ## Overview
//! [`MultiCulturalString`] keeps one text per culture. Keys are unique;
//! insertion order is kept for serialization but ignored by equality.
//! Host-side lookup ([`MultiCulturalString::get_string`]) follows the same
//! rules as the `mcs_get_string` storage primitive so in-memory and in-query
//! resolution agree.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::chain::encode_chain;
use crate::culture::CultureName;
use crate::native::mcs_get_string;
use crate::policy::FallbackPolicy;
use crate::policy::PolicyError;

// ============================================================================
// SECTION: Value Type
// ============================================================================

/// Localized string value.
///
/// # Invariants
/// - Culture keys are unique.
/// - Entries keep first-insertion order; replacing a text keeps its slot.
#[derive(Debug, Clone, Default)]
pub struct MultiCulturalString {
    /// Culture/text pairs in insertion order.
    entries: Vec<(CultureName, String)>,
}

impl MultiCulturalString {
    /// Creates an empty value.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates a value holding a single localized text.
    #[must_use]
    pub fn single(culture: CultureName, text: impl Into<String>) -> Self {
        Self::new().with(culture, text)
    }

    /// Returns the value with `text` set for `culture`.
    #[must_use]
    pub fn with(mut self, culture: CultureName, text: impl Into<String>) -> Self {
        self.set(culture, text);
        self
    }

    /// Sets the text for a culture, replacing an existing entry in place.
    pub fn set(&mut self, culture: CultureName, text: impl Into<String>) {
        let text = text.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == culture) {
            Some(entry) => entry.1 = text,
            None => self.entries.push((culture, text)),
        }
    }

    /// Removes the text for a culture, returning it when present.
    pub fn remove(&mut self, culture: &CultureName) -> Option<String> {
        let idx = self.entries.iter().position(|(existing, _)| existing == culture)?;
        Some(self.entries.remove(idx).1)
    }

    /// Returns the text stored for exactly this culture.
    #[must_use]
    pub fn get_exact(&self, culture: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing.as_str() == culture)
            .map(|(_, text)| text.as_str())
    }

    /// Resolves the best text for `culture`.
    ///
    /// Exact match first; when `use_fallback` is set, the policy chain is
    /// probed in order. Returns `None` when nothing matches.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError`] when the policy fails to produce a chain.
    pub fn get_string(
        &self,
        culture: &CultureName,
        use_fallback: bool,
        policy: &dyn FallbackPolicy,
    ) -> Result<Option<&str>, PolicyError> {
        let chain = if use_fallback { Some(encode_chain(&policy.chain(culture)?)) } else { None };
        Ok(mcs_get_string(self, culture.as_str(), chain.as_deref()))
    }

    /// Iterates cultures in insertion order.
    pub fn cultures(&self) -> impl Iterator<Item = &CultureName> {
        self.entries.iter().map(|(culture, _)| culture)
    }

    /// Iterates culture/text pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&CultureName, &str)> {
        self.entries.iter().map(|(culture, text)| (culture, text.as_str()))
    }

    /// Returns the number of localized texts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no text is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for MultiCulturalString {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .all(|(culture, text)| other.get_exact(culture.as_str()) == Some(text.as_str()))
    }
}

impl Eq for MultiCulturalString {}
