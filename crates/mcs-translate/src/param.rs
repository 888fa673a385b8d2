// crates/mcs-translate/src/param.rs
// ============================================================================
// Module: Parameter Types and Host Values
// Description: Static parameter tags of accessor calls and host-evaluated values.
// Purpose: Give classification and resolution a closed vocabulary of types.
// Dependencies: mcs-core
// ============================================================================

//! ## Overview
//! [`ParamType`] tags a declared parameter; classification matches on these
//! tags only. [`HostValue`] is what a backend's evaluator yields for a closed
//! argument expression.

use std::fmt;
use std::sync::Arc;

use mcs_core::CultureName;
use mcs_core::SharedPolicy;

// ============================================================================
// SECTION: Parameter Types
// ============================================================================

/// Declared type of an accessor parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// The localized-string value itself.
    MultiCulturalString,
    /// Raw stored text (the persisted column of a localized string).
    Text,
    /// Culture identifier.
    Culture,
    /// Boolean use-fallback flag.
    Boolean,
    /// Fallback policy capability.
    FallbackPolicy,
    /// Integer scalar.
    Integer,
    /// Any type outside this vocabulary.
    Other,
}

impl ParamType {
    /// Returns the type label used in diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MultiCulturalString => "MultiCulturalString",
            Self::Text => "Text",
            Self::Culture => "Culture",
            Self::Boolean => "Boolean",
            Self::FallbackPolicy => "FallbackPolicy",
            Self::Integer => "Integer",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How an accessor is invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallForm {
    /// Method on the value; the receiver is implicit and not a parameter.
    Instance,
    /// Free function taking the value as its first parameter.
    Extension,
}

/// Renders a parameter list as `(A, B)`.
pub(crate) fn signature_text(params: &[ParamType]) -> String {
    let inner: Vec<&str> = params.iter().map(|param| param.label()).collect();
    format!("({})", inner.join(", "))
}

// ============================================================================
// SECTION: Host Values
// ============================================================================

/// Value produced by evaluating a closed argument expression on the host.
#[derive(Debug, Clone)]
pub enum HostValue {
    /// Null / absent.
    Null,
    /// Boolean literal.
    Bool(bool),
    /// Culture identifier.
    Culture(CultureName),
    /// Fallback policy instance.
    Policy(SharedPolicy),
    /// A value of some other type.
    Other(&'static str),
}

impl HostValue {
    /// Returns the kind label used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "Boolean",
            Self::Culture(_) => "Culture",
            Self::Policy(_) => "FallbackPolicy",
            Self::Other(kind) => *kind,
        }
    }
}

impl PartialEq for HostValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(left), Self::Bool(right)) => left == right,
            (Self::Culture(left), Self::Culture(right)) => left == right,
            (Self::Policy(left), Self::Policy(right)) => Arc::ptr_eq(left, right),
            (Self::Other(left), Self::Other(right)) => left == right,
            _ => false,
        }
    }
}
