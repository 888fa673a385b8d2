// crates/mcs-translate/src/error.rs
// ============================================================================
// Module: Translation Errors
// Description: Failures raised while classifying or resolving an accessor call.
// Purpose: Abort translation of a call site before the query leaves the host.
// Dependencies: mcs-core, thiserror
// ============================================================================

//! ## Overview
//! Every variant is a translation-time failure: the query is never sent to
//! the persistence engine. Fallback policy failures pass through unchanged.

use mcs_core::PolicyError;
use thiserror::Error;

// ============================================================================
// SECTION: Evaluation Errors
// ============================================================================

/// Failure reported by a backend's closed-expression evaluator.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// The expression reads per-row data and has no host-side value.
    #[error("expression depends on row data: {0}")]
    RowDependent(String),
    /// The expression names a captured variable that is not bound.
    #[error("unbound variable `{0}`")]
    Unbound(String),
    /// The expression cannot be evaluated on the host.
    #[error("cannot evaluate expression: {0}")]
    Unsupported(String),
}

// ============================================================================
// SECTION: Translation Errors
// ============================================================================

/// Accessor translation errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - `position` fields index accessor arguments, receiver excluded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    /// The call signature is not one of the seven recognized shapes.
    #[error("unsupported accessor signature {signature}")]
    UnsupportedSignature {
        /// Rendered parameter list.
        signature: String,
    },
    /// An argument that must be host-resolvable depends on row data.
    #[error("argument {position} must be resolvable before the query runs: {detail}")]
    NonConstantArgument {
        /// Argument index.
        position: usize,
        /// Evaluator detail.
        detail: String,
    },
    /// A culture or flag argument evaluated to null.
    #[error("argument {position} ({expected}) evaluated to null")]
    NullArgument {
        /// Argument index.
        position: usize,
        /// Expected argument type.
        expected: &'static str,
    },
    /// An argument evaluated to a value of the wrong type.
    #[error("argument {position} expected {expected}, found {found}")]
    ArgumentType {
        /// Argument index.
        position: usize,
        /// Expected argument type.
        expected: &'static str,
        /// Evaluated value kind.
        found: &'static str,
    },
    /// The call supplies a different number of arguments than its shape.
    #[error("shape {shape} takes {expected} arguments, found {found}")]
    ArityMismatch {
        /// Shape label.
        shape: &'static str,
        /// Arguments the shape declares.
        expected: usize,
        /// Arguments supplied.
        found: usize,
    },
    /// The evaluator failed for a reason other than row dependence.
    #[error("argument {position} could not be evaluated: {source}")]
    Evaluation {
        /// Argument index.
        position: usize,
        /// Evaluator failure.
        source: EvalError,
    },
    /// The fallback policy failed to produce a chain.
    #[error(transparent)]
    Policy(#[from] PolicyError),
}

impl TranslateError {
    /// Maps an evaluator failure at `position` into a translation error.
    #[must_use]
    pub fn from_eval(position: usize, error: EvalError) -> Self {
        match error {
            EvalError::RowDependent(detail) => Self::NonConstantArgument {
                position,
                detail,
            },
            source => Self::Evaluation {
                position,
                source,
            },
        }
    }
}
