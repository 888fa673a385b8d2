// crates/mcs-translate/src/canonical.rs
// ============================================================================
// Module: Canonical Call Builder
// Description: Backend-neutral form of the native `mcs_get_string` call.
// Purpose: Fix the primitive's name, arity and argument order in one place.
// Dependencies: crate::resolve, mcs-core
// ============================================================================

//! ## Overview
//! A [`CanonicalCall`] is pure construction: three arguments in primitive
//! order, nothing validated beyond the fixed arity the array enforces.

use mcs_core::MCS_GET_STRING;
use mcs_core::MCS_GET_STRING_ARITY;

use crate::resolve::ResolvedTriple;

/// Argument of the canonical call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanonicalArg<T> {
    /// Backend target expression (stored column or value).
    Target(T),
    /// Text literal.
    Text(String),
    /// Null literal.
    Null,
}

/// Native primitive call ready for emission.
///
/// # Invariants
/// - `args` are `(target, culture_name, fallback_chain-or-null)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalCall<T> {
    /// Primitive function name.
    pub name: &'static str,
    /// Arguments in primitive order.
    pub args: [CanonicalArg<T>; MCS_GET_STRING_ARITY],
}

impl<T> CanonicalCall<T> {
    /// Builds the call from its three resolved inputs.
    #[must_use]
    pub fn build(target: T, culture_name: String, fallback_chain: Option<String>) -> Self {
        Self {
            name: MCS_GET_STRING,
            args: [
                CanonicalArg::Target(target),
                CanonicalArg::Text(culture_name),
                fallback_chain.map_or(CanonicalArg::Null, CanonicalArg::Text),
            ],
        }
    }

    /// Builds the call from a resolved triple.
    #[must_use]
    pub fn from_triple(triple: ResolvedTriple<T>) -> Self {
        Self::build(triple.target, triple.culture_name, triple.fallback_chain)
    }
}
