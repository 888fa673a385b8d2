// crates/mcs-translate/src/adapter.rs
// ============================================================================
// Module: Backend Adapter Interface
// Description: Minimal seam a query framework implements to reuse the pipeline.
// Purpose: Run classify/resolve/build identically for every backend.
// Dependencies: crate::{canonical, catalog, context, error, param, resolve, shape, trace},
//              tracing
// ============================================================================

//! ## Overview
//! A backend recognizes an accessor call through the
//! [`AccessorCatalog`](crate::AccessorCatalog), extracts its raw argument
//! nodes into an [`AccessorCall`], and hands it to [`translate`]. The backend
//! only supplies two capabilities: evaluating a closed expression and
//! emitting the native call node.

// ============================================================================
// SECTION: Imports
// ============================================================================

use tracing::debug;
use tracing::warn;

use crate::canonical::CanonicalCall;
use crate::catalog::AccessorName;
use crate::context::TranslationContext;
use crate::error::EvalError;
use crate::error::TranslateError;
use crate::param::HostValue;
use crate::resolve::resolve;
use crate::shape::Shape;
use crate::trace::TranslationTrace;

// ============================================================================
// SECTION: Adapter Contract
// ============================================================================

/// Query framework extension point.
pub trait BackendAdapter {
    /// Framework node for the accessor's target (already translated).
    type Target;
    /// Host expression for raw, not yet evaluated arguments.
    type Expr;
    /// Framework node produced for the native call.
    type Node;

    /// Short backend name for diagnostics.
    fn backend(&self) -> &'static str;

    /// Evaluates a closed expression on the host.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::RowDependent`] when the expression reads row data,
    /// or another [`EvalError`] when it cannot be evaluated.
    fn evaluate_closed(&self, expr: &Self::Expr) -> Result<HostValue, EvalError>;

    /// Emits the native call node into the framework's tree.
    fn emit_native(&self, call: CanonicalCall<Self::Target>) -> Self::Node;
}

/// Recognized accessor call with its raw argument nodes.
///
/// # Invariants
/// - `args` exclude the receiver; `target` is the receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessorCall<T, E> {
    /// Accessor name.
    pub accessor: AccessorName,
    /// Classified shape.
    pub shape: Shape,
    /// Receiver expression.
    pub target: T,
    /// Raw argument expressions.
    pub args: Vec<E>,
}

// ============================================================================
// SECTION: Pipeline
// ============================================================================

/// Translates one accessor call into the backend's native call node.
///
/// # Errors
///
/// Returns [`TranslateError`] when resolution fails; the call site is not
/// partially translated.
pub fn translate<A, T>(
    adapter: &A,
    ctx: &TranslationContext,
    call: AccessorCall<A::Target, A::Expr>,
    trace: &mut T,
) -> Result<A::Node, TranslateError>
where
    A: BackendAdapter + ?Sized,
    T: TranslationTrace + ?Sized,
{
    let AccessorCall {
        accessor,
        shape,
        target,
        args,
    } = call;
    trace.on_call(accessor, shape);
    let triple = match resolve(shape, target, &args, ctx, |expr| adapter.evaluate_closed(expr)) {
        Ok(triple) => triple,
        Err(err) => {
            warn!(
                backend = adapter.backend(),
                accessor = %accessor,
                shape = %shape,
                error = %err,
                "rejected accessor call"
            );
            trace.on_rejected(shape, &err);
            return Err(err);
        }
    };
    debug!(
        backend = adapter.backend(),
        accessor = %accessor,
        shape = %triple.shape,
        culture = %triple.culture_name,
        fallback_chain = triple.fallback_chain.as_deref().unwrap_or("<none>"),
        "resolved accessor call"
    );
    trace.on_resolved(triple.shape, &triple.culture_name, triple.fallback_chain.as_deref());
    Ok(adapter.emit_native(CanonicalCall::from_triple(triple)))
}
