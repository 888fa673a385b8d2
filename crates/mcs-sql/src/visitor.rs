// crates/mcs-sql/src/visitor.rs
// ============================================================================
// Module: SQL Visitor
// Description: Host expression to T-SQL tree translation.
// Purpose: Walk queries over a mapped entity and dispatch method calls.
// Dependencies: crate::{error, function, model, translator, tree}, mcs-query, mcs-translate, tracing
// ============================================================================

//! ## Overview
//! [`SqlVisitor`] translates one expression over one mapped entity. Property
//! reads become columns through the entity mapping; closed leaves are
//! evaluated on the host and inlined. [`SqlTranslator`] owns the model and
//! the translator chain.

// ============================================================================
// SECTION: Imports
// ============================================================================

use mcs_query::CompareOp;
use mcs_query::Expr;
use mcs_query::LogicalOp;
use mcs_query::Query;
use mcs_query::Scope;
use mcs_query::Value;
use mcs_translate::NoopTrace;
use mcs_translate::TranslationContext;
use mcs_translate::TranslationTrace;
use tracing::debug;

use crate::error::SqlError;
use crate::function::McsGetStringTranslator;
use crate::model::EntityMapping;
use crate::model::SqlModel;
use crate::translator::SqlMethodTranslator;
use crate::translator::TextFunctionTranslator;
use crate::tree::SqlExpr;
use crate::tree::SqlLiteral;
use crate::tree::SqlSelect;

// ============================================================================
// SECTION: Visitor
// ============================================================================

/// Expression visitor for one query compilation.
pub struct SqlVisitor<'a> {
    /// Entity name being queried.
    entity: &'a str,
    /// Table mapping of the entity.
    mapping: &'a EntityMapping,
    /// Method translators, tried in order.
    translators: &'a [Box<dyn SqlMethodTranslator>],
    /// Ambient culture and default policy.
    ctx: &'a TranslationContext,
    /// Captured variables.
    scope: &'a Scope,
    /// Accessor trace hook.
    trace: &'a mut dyn TranslationTrace,
}

impl<'a> SqlVisitor<'a> {
    /// Creates a visitor over `entity`.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError::UnknownEntity`] when the entity is not mapped.
    pub fn new(
        model: &'a SqlModel,
        entity: &'a str,
        translators: &'a [Box<dyn SqlMethodTranslator>],
        ctx: &'a TranslationContext,
        scope: &'a Scope,
        trace: &'a mut dyn TranslationTrace,
    ) -> Result<Self, SqlError> {
        let mapping =
            model.mapping(entity).ok_or_else(|| SqlError::UnknownEntity(entity.to_string()))?;
        Ok(Self {
            entity,
            mapping,
            translators,
            ctx,
            scope,
            trace,
        })
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
    /// Returns [`SqlError`] when a property is unmapped, no translator claims
    /// a method call, or a closed sub-expression fails to evaluate.
    pub fn visit(&mut self, expr: &Expr) -> Result<SqlExpr, SqlError> {
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
            } => {
                let column = self.mapping.column_of(property).ok_or_else(|| {
                    SqlError::UnknownProperty {
                        entity: self.entity.to_string(),
                        property: property.clone(),
                    }
                })?;
                Ok(SqlExpr::Column {
                    table: alias.clone(),
                    column: column.to_string(),
                })
            }
            Expr::Call(call) => {
                let translators = self.translators;
                for translator in translators {
                    if let Some(node) = translator.translate(call, self)? {
                        return Ok(node);
                    }
                }
                Err(SqlError::UnsupportedMethod(call.method.to_string()))
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
            } => Ok(SqlExpr::Binary {
                op: match op {
                    LogicalOp::And => "AND",
                    LogicalOp::Or => "OR",
                },
                left: Box::new(self.visit(left)?),
                right: Box::new(self.visit(right)?),
            }),
            Expr::Not(inner) => Ok(SqlExpr::Not(Box::new(self.visit(inner)?))),
            Expr::Coalesce(left, right) => Ok(SqlExpr::Function {
                schema: None,
                name: "coalesce".to_string(),
                args: vec![self.visit(left)?, self.visit(right)?],
            }),
            Expr::Conditional {
                test,
                if_true,
                if_false,
            } => Ok(SqlExpr::Case {
                test: Box::new(self.visit(test)?),
                if_true: Box::new(self.visit(if_true)?),
                if_false: Box::new(self.visit(if_false)?),
            }),
        }
    }

    /// Translates a comparison; equality with null becomes `IS [NOT] NULL`.
    fn visit_compare(&mut self, op: CompareOp, left: &Expr, right: &Expr) -> Result<SqlExpr, SqlError> {
        let left = self.visit(left)?;
        let right = self.visit(right)?;
        let null = SqlExpr::Constant(SqlLiteral::Null);
        if matches!(op, CompareOp::Eq | CompareOp::Ne) && (left == null || right == null) {
            let operand = if right == null { left } else { right };
            return Ok(SqlExpr::IsNull {
                operand: Box::new(operand),
                negated: op == CompareOp::Ne,
            });
        }
        Ok(SqlExpr::Binary {
            op: op.token(),
            left: Box::new(left),
            right: Box::new(right),
        })
    }
}

/// Converts a host value into a SQL literal.
fn literal(value: &Value) -> Result<SqlExpr, SqlError> {
    let literal = match value {
        Value::Null => SqlLiteral::Null,
        Value::Bool(flag) => SqlLiteral::Bool(*flag),
        Value::Int(number) => SqlLiteral::Int(*number),
        Value::Text(text) => SqlLiteral::Text(text.clone()),
        Value::Culture(culture) => SqlLiteral::Text(culture.as_str().to_string()),
        Value::Policy(_) => {
            return Err(SqlError::UnsupportedExpression(
                "fallback policy values have no sql form".to_string(),
            ));
        }
    };
    Ok(SqlExpr::Constant(literal))
}

// ============================================================================
// SECTION: Translator
// ============================================================================

/// SQL backend entry point.
#[derive(Debug)]
pub struct SqlTranslator {
    /// Mapping model.
    model: SqlModel,
    /// Method translators, tried in order.
    translators: Vec<Box<dyn SqlMethodTranslator>>,
    /// Ambient culture and default policy.
    ctx: TranslationContext,
}

impl SqlTranslator {
    /// Translator over `model` with the accessor and text-function
    /// translators installed.
    #[must_use]
    pub fn new(model: SqlModel, ctx: TranslationContext) -> Self {
        let translators: Vec<Box<dyn SqlMethodTranslator>> = vec![
            Box::new(McsGetStringTranslator::new(model.functions().to_vec())),
            Box::new(TextFunctionTranslator),
        ];
        Self {
            model,
            translators,
            ctx,
        }
    }

    /// Appends a method translator, tried after the installed ones.
    #[must_use]
    pub fn with_translator(mut self, translator: Box<dyn SqlMethodTranslator>) -> Self {
        self.translators.push(translator);
        self
    }

    /// Returns the mapping model.
    #[must_use]
    pub const fn model(&self) -> &SqlModel {
        &self.model
    }

    /// Returns the translation context.
    #[must_use]
    pub const fn context(&self) -> &TranslationContext {
        &self.ctx
    }

    /// Translates a single expression over `entity`.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError`] when the entity is unmapped or translation fails.
    pub fn translate_expr(
        &self,
        entity: &str,
        expr: &Expr,
        scope: &Scope,
        trace: &mut dyn TranslationTrace,
    ) -> Result<SqlExpr, SqlError> {
        SqlVisitor::new(&self.model, entity, &self.translators, &self.ctx, scope, trace)?.visit(expr)
    }

    /// Translates a query.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError`] when any part of the query fails to translate.
    pub fn translate_query(
        &self,
        query: &Query,
        scope: &Scope,
        trace: &mut dyn TranslationTrace,
    ) -> Result<SqlSelect, SqlError> {
        let mut visitor =
            SqlVisitor::new(&self.model, &query.entity, &self.translators, &self.ctx, scope, trace)?;
        let projection =
            query.select.iter().map(|expr| visitor.visit(expr)).collect::<Result<Vec<_>, _>>()?;
        let predicate = query.filter.as_ref().map(|expr| visitor.visit(expr)).transpose()?;
        let orderings = query
            .order_by
            .iter()
            .map(|(expr, order)| visitor.visit(expr).map(|node| (node, *order)))
            .collect::<Result<Vec<_>, _>>()?;
        let table = visitor.mapping.table.clone();
        let select = SqlSelect {
            projection,
            schema: self.model.schema().to_string(),
            table,
            alias: query.alias.clone(),
            predicate,
            orderings,
        };
        debug!(entity = %query.entity, sql = %select.render(), "translated sql query");
        Ok(select)
    }

    /// Translates a query and renders it, without tracing accessor calls.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError`] when translation fails.
    pub fn render_query(&self, query: &Query, scope: &Scope) -> Result<String, SqlError> {
        self.translate_query(query, scope, &mut NoopTrace).map(|select| select.render())
    }
}
