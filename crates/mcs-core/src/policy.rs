// crates/mcs-core/src/policy.rs
// ============================================================================
// Module: Fallback Policies
// Description: Pluggable strategies mapping a culture to its preference chain.
// Purpose: Define the fallback capability and the built-in implementations.
// Dependencies: crate::culture, serde, thiserror
// ============================================================================

//! ## Overview
//! A [`FallbackPolicy`] answers one question: given a requested culture, which
//! cultures should be probed, in which order, when no exact match exists?
//! Policies are opaque capabilities; only their `chain` behavior matters.
//!
//! Built-ins:
//! - [`ChainsFallbackPolicy`]: an ordered table of chains whose head selects
//!   the chain, with `*` standing for the requested culture.
//! - [`ParentCultureFallbackPolicy`]: walks identifier prefixes, then appends
//!   a fixed tail.
//! - [`NoFallbackPolicy`]: always the empty chain.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::culture::CultureError;
use crate::culture::CultureName;

// ============================================================================
// SECTION: Policy Contract
// ============================================================================

/// Failure raised by a fallback policy while computing a chain.
///
/// # Invariants
/// - Carries the policy's own message untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("fallback policy error: {message}")]
pub struct PolicyError {
    /// Policy-provided failure description.
    pub message: String,
}

impl PolicyError {
    /// Creates a policy error with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Strategy mapping a requested culture to an ordered preference chain.
///
/// Implementations must be deterministic and free of side effects visible to
/// the caller; translation invokes them once per call site.
pub trait FallbackPolicy: fmt::Debug + Send + Sync {
    /// Returns the ordered chain of cultures to probe for `culture`.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError`] when the policy cannot produce a chain.
    fn chain(&self, culture: &CultureName) -> Result<Vec<CultureName>, PolicyError>;
}

/// Shared, thread-safe policy handle.
pub type SharedPolicy = Arc<dyn FallbackPolicy>;

// ============================================================================
// SECTION: Globalization Settings
// ============================================================================

/// Process-level globalization settings.
///
/// Holds the default fallback policy. The value is built once at setup and
/// handed to translation explicitly; nothing here is global.
///
/// # Invariants
/// - `default_policy` is always present.
#[derive(Debug, Clone)]
pub struct GlobalizationSettings {
    /// Policy used when a call site does not supply one (or supplies null).
    pub default_policy: SharedPolicy,
}

impl GlobalizationSettings {
    /// Creates settings with the given default policy.
    #[must_use]
    pub fn new(default_policy: SharedPolicy) -> Self {
        Self {
            default_policy,
        }
    }
}

impl Default for GlobalizationSettings {
    fn default() -> Self {
        Self::new(Arc::new(ParentCultureFallbackPolicy::default()))
    }
}

// ============================================================================
// SECTION: Chain Table Policy
// ============================================================================

/// Wildcard token in chain-table configuration.
pub const WILDCARD: &str = "*";

/// One entry of a configured chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainPattern {
    /// `*`: matches any culture and resolves to the requested culture.
    Wildcard,
    /// A concrete culture identifier.
    Culture(CultureName),
}

impl ChainPattern {
    /// Parses a pattern; `*` is the wildcard, anything else must be a culture.
    ///
    /// # Errors
    ///
    /// Returns [`CultureError`] when a non-wildcard pattern is malformed.
    pub fn parse(raw: &str) -> Result<Self, CultureError> {
        if raw == WILDCARD {
            return Ok(Self::Wildcard);
        }
        CultureName::parse(raw).map(Self::Culture)
    }

    /// Resolves the pattern for a requested culture.
    #[must_use]
    pub fn resolve(&self, requested: &CultureName) -> CultureName {
        match self {
            Self::Wildcard => requested.clone(),
            Self::Culture(culture) => culture.clone(),
        }
    }
}

impl fmt::Display for ChainPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wildcard => f.write_str(WILDCARD),
            Self::Culture(culture) => culture.fmt(f),
        }
    }
}

/// Behavior when no configured chain head matches the requested culture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmatchedChain {
    /// Chain of one: the requested culture itself.
    #[default]
    RequestedOnly,
    /// Empty chain.
    Empty,
}

/// Chain table construction errors.
///
/// # Invariants
/// - Indices are zero-based positions in the configured table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainTableError {
    /// A configured chain has no patterns.
    #[error("chains[{chain}] is empty")]
    EmptyChain {
        /// Chain index.
        chain: usize,
    },
    /// A configured pattern is not a wildcard or a valid culture.
    #[error("chains[{chain}][{position}]: {source}")]
    Pattern {
        /// Chain index.
        chain: usize,
        /// Pattern index inside the chain.
        position: usize,
        /// Underlying culture error.
        source: CultureError,
    },
}

/// Fallback policy driven by an ordered table of chains.
///
/// The chain whose head equals the requested culture wins; otherwise the first
/// chain headed by `*`. The selected chain is returned with every `*`
/// replaced by the requested culture.
///
/// # Invariants
/// - Every chain has at least one pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainsFallbackPolicy {
    /// Configured chains in declaration order.
    chains: Vec<Vec<ChainPattern>>,
    /// Behavior when no chain head matches.
    unmatched: UnmatchedChain,
}

impl ChainsFallbackPolicy {
    /// Builds a policy from already-parsed chains.
    ///
    /// # Errors
    ///
    /// Returns [`ChainTableError::EmptyChain`] when a chain has no patterns.
    pub fn new(chains: Vec<Vec<ChainPattern>>) -> Result<Self, ChainTableError> {
        if let Some(chain) = chains.iter().position(Vec::is_empty) {
            return Err(ChainTableError::EmptyChain {
                chain,
            });
        }
        Ok(Self {
            chains,
            unmatched: UnmatchedChain::default(),
        })
    }

    /// Builds a policy from raw pattern strings (`[["kz-KZ", "kz", "ru"], ["*", "en"]]`).
    ///
    /// # Errors
    ///
    /// Returns [`ChainTableError`] when a chain is empty or a pattern is malformed.
    pub fn from_patterns<C, S>(chains: C) -> Result<Self, ChainTableError>
    where
        C: IntoIterator,
        C::Item: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed = Vec::new();
        for (chain, patterns) in chains.into_iter().enumerate() {
            let mut entries = Vec::new();
            for (position, raw) in patterns.into_iter().enumerate() {
                let pattern =
                    ChainPattern::parse(raw.as_ref()).map_err(|source| ChainTableError::Pattern {
                        chain,
                        position,
                        source,
                    })?;
                entries.push(pattern);
            }
            parsed.push(entries);
        }
        Self::new(parsed)
    }

    /// Sets the behavior for requested cultures no chain head matches.
    #[must_use]
    pub fn with_unmatched(mut self, unmatched: UnmatchedChain) -> Self {
        self.unmatched = unmatched;
        self
    }

    /// Returns the configured chains.
    #[must_use]
    pub fn chains(&self) -> &[Vec<ChainPattern>] {
        &self.chains
    }

    /// Returns the configured unmatched behavior.
    #[must_use]
    pub const fn unmatched(&self) -> UnmatchedChain {
        self.unmatched
    }

    /// Selects the chain for a requested culture.
    fn select(&self, culture: &CultureName) -> Option<&[ChainPattern]> {
        let exact = self
            .chains
            .iter()
            .find(|chain| matches!(chain.first(), Some(ChainPattern::Culture(head)) if head == culture));
        exact
            .or_else(|| {
                self.chains.iter().find(|chain| matches!(chain.first(), Some(ChainPattern::Wildcard)))
            })
            .map(Vec::as_slice)
    }
}

impl FallbackPolicy for ChainsFallbackPolicy {
    fn chain(&self, culture: &CultureName) -> Result<Vec<CultureName>, PolicyError> {
        match self.select(culture) {
            Some(chain) => Ok(chain.iter().map(|pattern| pattern.resolve(culture)).collect()),
            None => Ok(match self.unmatched {
                UnmatchedChain::RequestedOnly => vec![culture.clone()],
                UnmatchedChain::Empty => Vec::new(),
            }),
        }
    }
}

// ============================================================================
// SECTION: Parent Culture Policy
// ============================================================================

/// Fallback policy walking identifier prefixes.
///
/// `en-US` yields `en-US, en`, followed by each tail culture not already in
/// the chain. The invariant culture yields only the tail.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParentCultureFallbackPolicy {
    /// Cultures appended after the parent walk.
    tail: Vec<CultureName>,
}

impl ParentCultureFallbackPolicy {
    /// Creates a parent-walk policy with the given tail.
    #[must_use]
    pub const fn new(tail: Vec<CultureName>) -> Self {
        Self {
            tail,
        }
    }
}

impl FallbackPolicy for ParentCultureFallbackPolicy {
    fn chain(&self, culture: &CultureName) -> Result<Vec<CultureName>, PolicyError> {
        let mut chain = Vec::new();
        if !culture.is_invariant() {
            let mut current = Some(culture.clone());
            while let Some(next) = current {
                current = next.parent();
                chain.push(next);
            }
        }
        for culture in &self.tail {
            if !chain.contains(culture) {
                chain.push(culture.clone());
            }
        }
        Ok(chain)
    }
}

// ============================================================================
// SECTION: No Fallback Policy
// ============================================================================

/// Fallback policy that never suggests alternatives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoFallbackPolicy;

impl FallbackPolicy for NoFallbackPolicy {
    fn chain(&self, _culture: &CultureName) -> Result<Vec<CultureName>, PolicyError> {
        Ok(Vec::new())
    }
}
