// crates/mcs-hql/src/visitor.rs
// ============================================================================
// Module: HQL Visitor
// Description: Host expression to HQL tree translation.
// Purpose: Walk queries, dispatch method calls to generators, check the result.
// Dependencies: crate::{dialect, error, generator, tree}, mcs-query, mcs-translate, tracing
// ============================================================================

//! ## Overview
//! [`HqlVisitor`] translates one expression tree. Captured variables and
//! culture lookups are evaluated on the host and inlined as literals; row
//! reads become property paths; method calls go to the generator registry.
//! [`HqlTranslator`] owns the registry, dialect and context and translates
//! whole queries.

// ============================================================================
// SECTION: Imports
// ============================================================================

use mcs_query::CompareOp;
use mcs_query::Expr;
use mcs_query::Query;
use mcs_query::Scope;
use mcs_query::Value;
use mcs_translate::NoopTrace;
use mcs_translate::TranslationContext;
use mcs_translate::TranslationTrace;
use tracing::debug;

use crate::dialect::HqlDialect;
use crate::error::HqlError;
use crate::generator::HqlGeneratorRegistry;
use crate::tree::HqlLiteral;
use crate::tree::HqlNode;

// ============================================================================
// SECTION: Visitor
// ============================================================================

/// Expression visitor for one query compilation.
pub struct HqlVisitor<'a> {
    /// Method generators.
    registry: &'a HqlGeneratorRegistry,
    /// Ambient culture and default policy.
    ctx: &'a TranslationContext,
    /// Captured variables.
    scope: &'a Scope,
    /// Accessor trace hook.
    trace: &'a mut dyn TranslationTrace,
}

impl<'a> HqlVisitor<'a> {
    /// Creates a visitor.
    pub fn new(
        registry: &'a HqlGeneratorRegistry,
        ctx: &'a TranslationContext,
        scope: &'a Scope,
        trace: &'a mut dyn TranslationTrace,
    ) -> Self {
        Self {
            registry,
            ctx,
            scope,
            trace,
        }
    }

    /// Returns the translation context.
    #[must_use]
    pub const fn context(&self) -> &'a TranslationContext {
        self.ctx
    }

    /// Returns the captured-variable scope.
    #[must_use]
    pub const fn scope(&self) -> &'a Scope {
        self.scope
    }

    /// Returns the trace hook.
    pub fn trace(&mut self) -> &mut dyn TranslationTrace {
        &mut *self.trace
    }

    /// Translates an expression.
    ///
    /// # Errors
    ///
    /// Returns [`HqlError`] when a method has no generator, a closed
    /// sub-expression fails to evaluate, or a value has no HQL form.
    pub fn visit(&mut self, expr: &Expr) -> Result<HqlNode, HqlError> {
        match expr {
            Expr::Constant(value) => literal(value),
            Expr::Captured(_) | Expr::CultureFromName(_) => {
                let value = self.scope.evaluate(expr)?;
                literal(&value)
            }
            Expr::Property {
                alias,
                property,
                ..
            } => Ok(HqlNode::Dot(Box::new(HqlNode::Alias(alias.clone())), property.clone())),
            Expr::Call(call) => {
                let registry = self.registry;
                let generator = registry
                    .find(call)
                    .ok_or_else(|| HqlError::UnsupportedMethod(call.method.to_string()))?;
                generator.build(call, self)
            }
            Expr::Compare {
                op,
                left,
                right,
            } => self.visit_compare(*op, left, right),
            Expr::Logical {
                op,
                left,
                right,
            } => Ok(HqlNode::Binary {
                op: op.keyword(),
                left: Box::new(self.visit(left)?),
                right: Box::new(self.visit(right)?),
            }),
            Expr::Not(inner) => Ok(HqlNode::Not(Box::new(self.visit(inner)?))),
            Expr::Coalesce(left, right) => Ok(HqlNode::MethodCall {
                name: "coalesce".to_string(),
                args: vec![self.visit(left)?, self.visit(right)?],
            }),
            Expr::Conditional {
                test,
                if_true,
                if_false,
            } => Ok(HqlNode::Case {
                test: Box::new(self.visit(test)?),
                if_true: Box::new(self.visit(if_true)?),
                if_false: Box::new(self.visit(if_false)?),
            }),
        }
    }

    /// Translates a comparison; equality with null becomes `is [not] null`.
    fn visit_compare(&mut self, op: CompareOp, left: &Expr, right: &Expr) -> Result<HqlNode, HqlError> {
        let left = self.visit(left)?;
        let right = self.visit(right)?;
        let null = HqlNode::Constant(HqlLiteral::Null);
        if matches!(op, CompareOp::Eq | CompareOp::Ne) && (left == null || right == null) {
            let operand = if right == null { left } else { right };
            return Ok(HqlNode::IsNull {
                operand: Box::new(operand),
                negated: op == CompareOp::Ne,
            });
        }
        Ok(HqlNode::Binary {
            op: op.token(),
            left: Box::new(left),
            right: Box::new(right),
        })
    }
}

/// Converts a host value into an HQL literal.
fn literal(value: &Value) -> Result<HqlNode, HqlError> {
    let literal = match value {
        Value::Null => HqlLiteral::Null,
        Value::Bool(flag) => HqlLiteral::Bool(*flag),
        Value::Int(number) => HqlLiteral::Int(*number),
        Value::Text(text) => HqlLiteral::Text(text.clone()),
        Value::Culture(culture) => HqlLiteral::Text(culture.as_str().to_string()),
        Value::Policy(_) => {
            return Err(HqlError::UnsupportedExpression(
                "fallback policy values have no hql form".to_string(),
            ));
        }
    };
    Ok(HqlNode::Constant(literal))
}

// ============================================================================
// SECTION: Translator
// ============================================================================

/// HQL backend entry point.
#[derive(Debug)]
pub struct HqlTranslator {
    /// Method generators.
    registry: HqlGeneratorRegistry,
    /// Target dialect functions.
    dialect: HqlDialect,
    /// Ambient culture and default policy.
    ctx: TranslationContext,
}

impl HqlTranslator {
    /// Translator with accessor support and the default dialect functions.
    #[must_use]
    pub fn new(ctx: TranslationContext) -> Self {
        Self::with_parts(HqlGeneratorRegistry::with_mcs_accessors(), HqlDialect::with_mcs_functions(), ctx)
    }

    /// Translator from explicit parts.
    #[must_use]
    pub const fn with_parts(
        registry: HqlGeneratorRegistry,
        dialect: HqlDialect,
        ctx: TranslationContext,
    ) -> Self {
        Self {
            registry,
            dialect,
            ctx,
        }
    }

    /// Returns the translation context.
    #[must_use]
    pub const fn context(&self) -> &TranslationContext {
        &self.ctx
    }

    /// Translates a single expression.
    ///
    /// # Errors
    ///
    /// Returns [`HqlError`] when translation or the dialect check fails.
    pub fn translate_expr(
        &self,
        expr: &Expr,
        scope: &Scope,
        trace: &mut dyn TranslationTrace,
    ) -> Result<HqlNode, HqlError> {
        let node = HqlVisitor::new(&self.registry, &self.ctx, scope, trace).visit(expr)?;
        self.dialect.check(&node)?;
        Ok(node)
    }

    /// Translates a query.
    ///
    /// # Errors
    ///
    /// Returns [`HqlError`] when any part of the query fails to translate or
    /// the dialect check fails.
    pub fn translate_query(
        &self,
        query: &Query,
        scope: &Scope,
        trace: &mut dyn TranslationTrace,
    ) -> Result<HqlNode, HqlError> {
        let mut visitor = HqlVisitor::new(&self.registry, &self.ctx, scope, trace);
        let select = query.select.iter().map(|expr| visitor.visit(expr)).collect::<Result<Vec<_>, _>>()?;
        let filter = query.filter.as_ref().map(|expr| visitor.visit(expr)).transpose()?.map(Box::new);
        let order_by = query
            .order_by
            .iter()
            .map(|(expr, order)| visitor.visit(expr).map(|node| (node, *order)))
            .collect::<Result<Vec<_>, _>>()?;
        let node = HqlNode::Query {
            select,
            entity: query.entity.clone(),
            alias: query.alias.clone(),
            filter,
            order_by,
        };
        self.dialect.check(&node)?;
        debug!(entity = %query.entity, hql = %node.render(), "translated hql query");
        Ok(node)
    }

    /// Translates a query and renders it, without tracing accessor calls.
    ///
    /// # Errors
    ///
    /// Returns [`HqlError`] when translation fails.
    pub fn render_query(&self, query: &Query, scope: &Scope) -> Result<String, HqlError> {
        self.translate_query(query, scope, &mut NoopTrace).map(|node| node.render())
    }
}
