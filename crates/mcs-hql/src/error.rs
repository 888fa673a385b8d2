// crates/mcs-hql/src/error.rs
// ============================================================================
// Module: HQL Errors
// Description: Failures raised while building or checking HQL.
// Purpose: Abort the query build on any unsupported construct.
// Dependencies: mcs-translate, thiserror
// ============================================================================

//! ## Overview
//! Accessor translation failures are wrapped unchanged.

use mcs_translate::EvalError;
use mcs_translate::TranslateError;
use thiserror::Error;

/// HQL backend errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HqlError {
    /// An accessor call could not be translated.
    #[error(transparent)]
    Translate(#[from] TranslateError),
    /// No generator handles the called method.
    #[error("no hql generator for method `{0}`")]
    UnsupportedMethod(String),
    /// The expression has no HQL form.
    #[error("unsupported expression: {0}")]
    UnsupportedExpression(String),
    /// A closed sub-expression failed to evaluate.
    #[error("cannot evaluate closed expression: {0}")]
    Evaluation(#[from] EvalError),
    /// A registered function is called with the wrong number of arguments.
    #[error("function `{name}` takes {expected} arguments, found {found}")]
    FunctionArity {
        /// Function name.
        name: String,
        /// Registered arity.
        expected: usize,
        /// Supplied arguments.
        found: usize,
    },
}
