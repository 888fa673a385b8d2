// crates/mcs-sql/src/error.rs
// ============================================================================
// Module: SQL Errors
// Description: Failures raised while building the model or translating queries.
// Purpose: Fail model setup or the query build; never emit partial SQL.
// Dependencies: mcs-translate, thiserror
// ============================================================================

//! ## Overview
//! Accessor translation failures are wrapped unchanged, both at function
//! registration and at query translation.

use mcs_translate::EvalError;
use mcs_translate::TranslateError;
use thiserror::Error;

/// SQL backend errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SqlError {
    /// An accessor call or registration could not be translated.
    #[error(transparent)]
    Translate(#[from] TranslateError),
    /// A registered function is not one of the accessor overloads.
    #[error("`{0}` is not a localized-string accessor")]
    NotAnAccessor(String),
    /// No translator handles the called method.
    #[error("no sql translation for method `{0}`")]
    UnsupportedMethod(String),
    /// The expression has no SQL form.
    #[error("unsupported expression: {0}")]
    UnsupportedExpression(String),
    /// A closed sub-expression failed to evaluate.
    #[error("cannot evaluate closed expression: {0}")]
    Evaluation(#[from] EvalError),
    /// The queried entity is not mapped.
    #[error("entity `{0}` is not mapped")]
    UnknownEntity(String),
    /// The read property is not mapped to a column.
    #[error("property `{entity}.{property}` is not mapped")]
    UnknownProperty {
        /// Entity name.
        entity: String,
        /// Property name.
        property: String,
    },
}
