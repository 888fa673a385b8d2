// crates/mcs-translate/src/resolve.rs
// ============================================================================
// Module: Host-Side Partial Evaluator
// Description: Resolves culture, use-fallback flag and policy of a call site.
// Purpose: Freeze every host-dependent input into literals before emission.
// Dependencies: crate::{context, error, param, shape}, mcs-core
// ============================================================================

//! ## Overview
//! Resolution runs in a fixed order: culture, policy, flag, chain. Each
//! argument named by the shape is evaluated once through the backend's
//! closed-expression evaluator. The storage layer cannot run host code, so
//! the result is literal text only: the culture identifier and either the
//! comma-joined chain or `None` when fallback is off.
//!
//! `None` and `Some("")` differ: the latter means fallback was requested and
//! the policy returned an empty chain.

// ============================================================================
// SECTION: Imports
// ============================================================================

use mcs_core::CultureName;
use mcs_core::SharedPolicy;
use mcs_core::encode_chain;

use crate::context::TranslationContext;
use crate::error::EvalError;
use crate::error::TranslateError;
use crate::param::HostValue;
use crate::param::ParamType;
use crate::shape::CultureSource;
use crate::shape::FlagSource;
use crate::shape::PolicySource;
use crate::shape::Shape;

// ============================================================================
// SECTION: Resolved Triple
// ============================================================================

/// Fully resolved inputs of one native call.
///
/// # Invariants
/// - `fallback_chain` is `None` exactly when use-fallback resolved to false.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTriple<T> {
    /// Shape the call site was classified as.
    pub shape: Shape,
    /// Target expression, untouched.
    pub target: T,
    /// Resolved culture identifier.
    pub culture_name: String,
    /// Comma-joined chain, or `None` for exact match only.
    pub fallback_chain: Option<String>,
}

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Resolves a classified call site.
///
/// `target` passes through unchanged. `args` are the raw argument
/// expressions, receiver excluded; `evaluate` turns a closed expression into a
/// host value.
///
/// # Errors
///
/// Returns [`TranslateError`] when the argument count does not match the
/// shape, an argument is row-dependent, null where a value is required, of the
/// wrong type, or when the policy fails.
pub fn resolve<T, E, F>(
    shape: Shape,
    target: T,
    args: &[E],
    ctx: &TranslationContext,
    mut evaluate: F,
) -> Result<ResolvedTriple<T>, TranslateError>
where
    F: FnMut(&E) -> Result<HostValue, EvalError>,
{
    if args.len() != shape.arity() {
        return Err(TranslateError::ArityMismatch {
            shape: shape.label(),
            expected: shape.arity(),
            found: args.len(),
        });
    }
    let mut eval_at = |position: usize| -> Result<HostValue, TranslateError> {
        let expr = args.get(position).ok_or(TranslateError::ArityMismatch {
            shape: shape.label(),
            expected: shape.arity(),
            found: args.len(),
        })?;
        evaluate(expr).map_err(|err| TranslateError::from_eval(position, err))
    };

    let culture = match shape.culture_source() {
        CultureSource::Ambient => ctx.ui_culture.clone(),
        CultureSource::Argument(position) => expect_culture(position, eval_at(position)?)?,
    };
    let policy = match shape.policy_source() {
        PolicySource::Default => ctx.default_policy.clone(),
        PolicySource::ArgumentOrDefault(position) => {
            expect_policy(position, eval_at(position)?)?.unwrap_or_else(|| ctx.default_policy.clone())
        }
    };
    let use_fallback = match shape.flag_source() {
        FlagSource::AlwaysTrue => true,
        FlagSource::Argument(position) => expect_flag(position, eval_at(position)?)?,
    };
    let fallback_chain =
        if use_fallback { Some(encode_chain(&policy.chain(&culture)?)) } else { None };

    Ok(ResolvedTriple {
        shape,
        target,
        culture_name: culture.into(),
        fallback_chain,
    })
}

// ============================================================================
// SECTION: Value Checks
// ============================================================================

/// Requires a culture value.
fn expect_culture(position: usize, value: HostValue) -> Result<CultureName, TranslateError> {
    match value {
        HostValue::Culture(culture) => Ok(culture),
        HostValue::Null => Err(TranslateError::NullArgument {
            position,
            expected: ParamType::Culture.label(),
        }),
        other => Err(mismatch(position, ParamType::Culture, &other)),
    }
}

/// Requires a policy value; null means "use the default".
fn expect_policy(position: usize, value: HostValue) -> Result<Option<SharedPolicy>, TranslateError> {
    match value {
        HostValue::Policy(policy) => Ok(Some(policy)),
        HostValue::Null => Ok(None),
        other => Err(mismatch(position, ParamType::FallbackPolicy, &other)),
    }
}

/// Requires a boolean value.
fn expect_flag(position: usize, value: HostValue) -> Result<bool, TranslateError> {
    match value {
        HostValue::Bool(flag) => Ok(flag),
        HostValue::Null => Err(TranslateError::NullArgument {
            position,
            expected: ParamType::Boolean.label(),
        }),
        other => Err(mismatch(position, ParamType::Boolean, &other)),
    }
}

/// Builds a type mismatch error.
fn mismatch(position: usize, expected: ParamType, found: &HostValue) -> TranslateError {
    TranslateError::ArgumentType {
        position,
        expected: expected.label(),
        found: found.kind(),
    }
}
