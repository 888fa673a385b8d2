// crates/mcs-query/src/value.rs
// ============================================================================
// Module: Query Values
// Description: Host values appearing as constants and captured variables.
// Purpose: Carry literal data through expression trees and evaluation.
// Dependencies: mcs-core, mcs-translate
// ============================================================================

//! ## Overview
//! [`Value`] is the host-side value domain of query expressions. Policies
//! compare by identity; everything else by content.

use std::sync::Arc;

use mcs_core::CultureName;
use mcs_core::SharedPolicy;
use mcs_translate::HostValue;
use mcs_translate::ParamType;

/// Host value of a query expression.
#[derive(Debug, Clone)]
pub enum Value {
    /// Null.
    Null,
    /// Boolean.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Text.
    Text(String),
    /// Culture identifier.
    Culture(CultureName),
    /// Fallback policy instance.
    Policy(SharedPolicy),
}

impl Value {
    /// Returns the static type of the value; `None` for null.
    #[must_use]
    pub const fn param_type(&self) -> Option<ParamType> {
        match self {
            Self::Null => None,
            Self::Bool(_) => Some(ParamType::Boolean),
            Self::Int(_) => Some(ParamType::Integer),
            Self::Text(_) => Some(ParamType::Text),
            Self::Culture(_) => Some(ParamType::Culture),
            Self::Policy(_) => Some(ParamType::FallbackPolicy),
        }
    }

    /// Returns the kind label used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self.param_type() {
            Some(param) => param.label(),
            None => "null",
        }
    }

    /// Converts into the value vocabulary of accessor resolution.
    #[must_use]
    pub fn into_host(self) -> HostValue {
        match self {
            Self::Null => HostValue::Null,
            Self::Bool(flag) => HostValue::Bool(flag),
            Self::Culture(culture) => HostValue::Culture(culture),
            Self::Policy(policy) => HostValue::Policy(policy),
            other => HostValue::Other(other.kind()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(left), Self::Bool(right)) => left == right,
            (Self::Int(left), Self::Int(right)) => left == right,
            (Self::Text(left), Self::Text(right)) => left == right,
            (Self::Culture(left), Self::Culture(right)) => left == right,
            (Self::Policy(left), Self::Policy(right)) => Arc::ptr_eq(left, right),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<CultureName> for Value {
    fn from(value: CultureName) -> Self {
        Self::Culture(value)
    }
}

impl From<SharedPolicy> for Value {
    fn from(value: SharedPolicy) -> Self {
        Self::Policy(value)
    }
}
