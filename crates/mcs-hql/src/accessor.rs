// crates/mcs-hql/src/accessor.rs
// ============================================================================
// Module: HQL Accessor Generator
// Description: Generator for the fourteen instance accessor overloads.
// Purpose: Route `value.to_string(..)` / `value.get_string(..)` to the shared pipeline.
// Dependencies: crate::{error, generator, tree, visitor}, mcs-query, mcs-translate
// ============================================================================

//! ## Overview
//! The receiver is visited into HQL and becomes the target; the raw
//! arguments stay host expressions and are evaluated through the query
//! scope. The emitted node is `mcs_get_string(target, 'culture', 'chain')`
//! with `null` for a disabled fallback. Only receivers statically typed as
//! localized strings are claimed; `to_string` on any other value is left to
//! other generators.

use mcs_query::Expr;
use mcs_query::MethodCall;
use mcs_query::Scope;
use mcs_translate::AccessorCall;
use mcs_translate::AccessorCatalog;
use mcs_translate::AccessorName;
use mcs_translate::BackendAdapter;
use mcs_translate::CanonicalArg;
use mcs_translate::CanonicalCall;
use mcs_translate::EvalError;
use mcs_translate::HostValue;
use mcs_translate::ParamType;
use mcs_translate::Shape;
use mcs_translate::translate;

use crate::error::HqlError;
use crate::generator::HqlMethodGenerator;
use crate::tree::HqlLiteral;
use crate::tree::HqlNode;
use crate::visitor::HqlVisitor;

// ============================================================================
// SECTION: Adapter
// ============================================================================

/// Pipeline adapter for the HQL backend.
#[derive(Debug, Clone, Copy)]
pub struct HqlAccessorAdapter<'s> {
    /// Captured variables of the query being translated.
    scope: &'s Scope,
}

impl<'s> HqlAccessorAdapter<'s> {
    /// Creates an adapter evaluating arguments in `scope`.
    #[must_use]
    pub const fn new(scope: &'s Scope) -> Self {
        Self {
            scope,
        }
    }
}

impl BackendAdapter for HqlAccessorAdapter<'_> {
    type Target = HqlNode;
    type Expr = Expr;
    type Node = HqlNode;

    fn backend(&self) -> &'static str {
        "hql"
    }

    fn evaluate_closed(&self, expr: &Expr) -> Result<HostValue, EvalError> {
        self.scope.evaluate_host(expr)
    }

    fn emit_native(&self, call: CanonicalCall<HqlNode>) -> HqlNode {
        let args = call
            .args
            .into_iter()
            .map(|arg| match arg {
                CanonicalArg::Target(node) => node,
                CanonicalArg::Text(text) => HqlNode::Constant(HqlLiteral::Text(text)),
                CanonicalArg::Null => HqlNode::Constant(HqlLiteral::Null),
            })
            .collect();
        HqlNode::MethodCall {
            name: call.name.to_string(),
            args,
        }
    }
}

// ============================================================================
// SECTION: Generator
// ============================================================================

/// Generator claiming the instance accessor overloads.
#[derive(Debug, Clone)]
pub struct McsAccessorGenerator {
    /// Supported method identities.
    catalog: AccessorCatalog,
}

impl Default for McsAccessorGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl McsAccessorGenerator {
    /// Creates the generator over the instance accessor catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            catalog: AccessorCatalog::instance(),
        }
    }

    /// Returns the accessor and shape when `call` is an accessor overload
    /// invoked on a localized-string receiver.
    fn claim<'c>(&self, call: &'c MethodCall) -> Option<(AccessorName, Shape, &'c Expr)> {
        let method = &call.method;
        let receiver = call.receiver.as_deref()?;
        if receiver.static_type() != Some(ParamType::MultiCulturalString) {
            return None;
        }
        let (accessor, shape) = self.catalog.lookup(&method.name, method.form, &method.params)?;
        Some((accessor, shape, receiver))
    }
}

impl HqlMethodGenerator for McsAccessorGenerator {
    fn supports(&self, call: &MethodCall) -> bool {
        self.claim(call).is_some()
    }

    fn build(&self, call: &MethodCall, visitor: &mut HqlVisitor<'_>) -> Result<HqlNode, HqlError> {
        let (accessor, shape, receiver) =
            self.claim(call).ok_or_else(|| HqlError::UnsupportedMethod(call.method.to_string()))?;
        let target = visitor.visit(receiver)?;
        let adapter = HqlAccessorAdapter::new(visitor.scope());
        let ctx = visitor.context();
        let accessor_call = AccessorCall {
            accessor,
            shape,
            target,
            args: call.args.clone(),
        };
        Ok(translate(&adapter, ctx, accessor_call, visitor.trace())?)
    }
}
