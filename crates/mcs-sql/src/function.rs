// crates/mcs-sql/src/function.rs
// ============================================================================
// Module: Accessor Database Functions
// Description: Registered accessor extensions and their method-call translator.
// Purpose: Map `to_string(raw, ..)` / `get_string(raw, ..)` to `[schema].[mcs_get_string]`.
// Dependencies: crate::{error, translator, tree, visitor}, mcs-core, mcs-query, mcs-translate
// ============================================================================

//! ## Overview
//! A [`DbFunction`] is an accessor extension registered on the model, with
//! its shape fixed at registration. [`McsGetStringTranslator`] claims calls
//! to registered functions: the first argument (the raw stored column) is
//! translated to SQL as the target, the rest are evaluated on the host.

// ============================================================================
// SECTION: Imports
// ============================================================================

use mcs_core::MCS_GET_STRING;
use mcs_query::Expr;
use mcs_query::MethodCall;
use mcs_query::MethodRef;
use mcs_query::Scope;
use mcs_translate::AccessorCall;
use mcs_translate::AccessorName;
use mcs_translate::BackendAdapter;
use mcs_translate::CallForm;
use mcs_translate::CanonicalArg;
use mcs_translate::CanonicalCall;
use mcs_translate::EvalError;
use mcs_translate::HostValue;
use mcs_translate::ParamType;
use mcs_translate::Shape;
use mcs_translate::classify;
use mcs_translate::translate;

use crate::error::SqlError;
use crate::translator::SqlMethodTranslator;
use crate::tree::SqlExpr;
use crate::tree::SqlLiteral;
use crate::visitor::SqlVisitor;

// ============================================================================
// SECTION: Registered Functions
// ============================================================================

/// Accessor extension mapped to the storage primitive.
///
/// # Invariants
/// - `shape` is the classification of `method`.
/// - `method` is an extension whose receiver is raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbFunction {
    /// Registered method identity.
    pub method: MethodRef,
    /// Accessor name.
    pub accessor: AccessorName,
    /// Classified shape.
    pub shape: Shape,
    /// Schema of the database function.
    pub schema: String,
    /// Database function name.
    pub name: &'static str,
}

impl DbFunction {
    /// Classifies and registers `method` under `schema`.
    ///
    /// Name, form and receiver are checked before the signature.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError::NotAnAccessor`] when the method is not an accessor
    /// extension over raw text and [`SqlError::Translate`] for an accessor
    /// with an unrecognized signature.
    pub fn register(method: MethodRef, schema: &str) -> Result<Self, SqlError> {
        let accessor = AccessorName::parse(&method.name)
            .filter(|_| method.form == CallForm::Extension)
            .filter(|_| method.params.first() == Some(&ParamType::Text))
            .ok_or_else(|| SqlError::NotAnAccessor(method.to_string()))?;
        let shape = classify(&method.params, CallForm::Extension)?;
        Ok(Self {
            method,
            accessor,
            shape,
            schema: schema.to_string(),
            name: MCS_GET_STRING,
        })
    }
}

// ============================================================================
// SECTION: Adapter
// ============================================================================

/// Pipeline adapter for the SQL backend.
#[derive(Debug, Clone, Copy)]
pub struct SqlAccessorAdapter<'s> {
    /// Captured variables of the query being translated.
    scope: &'s Scope,
    /// Schema of the emitted function.
    schema: &'s str,
}

impl<'s> SqlAccessorAdapter<'s> {
    /// Creates an adapter evaluating in `scope` and emitting into `schema`.
    #[must_use]
    pub const fn new(scope: &'s Scope, schema: &'s str) -> Self {
        Self {
            scope,
            schema,
        }
    }
}

impl BackendAdapter for SqlAccessorAdapter<'_> {
    type Target = SqlExpr;
    type Expr = Expr;
    type Node = SqlExpr;

    fn backend(&self) -> &'static str {
        "sql"
    }

    fn evaluate_closed(&self, expr: &Expr) -> Result<HostValue, EvalError> {
        self.scope.evaluate_host(expr)
    }

    fn emit_native(&self, call: CanonicalCall<SqlExpr>) -> SqlExpr {
        let args = call
            .args
            .into_iter()
            .map(|arg| match arg {
                CanonicalArg::Target(expr) => expr,
                CanonicalArg::Text(text) => SqlExpr::Constant(SqlLiteral::Text(text)),
                CanonicalArg::Null => SqlExpr::Constant(SqlLiteral::Null),
            })
            .collect();
        SqlExpr::Function {
            schema: Some(self.schema.to_string()),
            name: call.name.to_string(),
            args,
        }
    }
}

// ============================================================================
// SECTION: Translator
// ============================================================================

/// Method-call translator for registered accessor functions.
#[derive(Debug, Clone, Default)]
pub struct McsGetStringTranslator {
    /// Registered functions.
    functions: Vec<DbFunction>,
}

impl McsGetStringTranslator {
    /// Creates a translator over registered functions.
    #[must_use]
    pub const fn new(functions: Vec<DbFunction>) -> Self {
        Self {
            functions,
        }
    }
}

impl SqlMethodTranslator for McsGetStringTranslator {
    fn translate(
        &self,
        call: &MethodCall,
        visitor: &mut SqlVisitor<'_>,
    ) -> Result<Option<SqlExpr>, SqlError> {
        let Some(function) = self.functions.iter().find(|function| function.method == call.method)
        else {
            return Ok(None);
        };
        let Some((raw_target, args)) = call.args.split_first() else {
            return Err(SqlError::UnsupportedExpression(format!(
                "accessor `{}` called without its stored column",
                call.method
            )));
        };
        let target = visitor.visit(raw_target)?;
        let adapter = SqlAccessorAdapter::new(visitor.scope(), &function.schema);
        let ctx = visitor.context();
        let accessor_call = AccessorCall {
            accessor: function.accessor,
            shape: function.shape,
            target,
            args: args.to_vec(),
        };
        Ok(Some(translate(&adapter, ctx, accessor_call, visitor.trace())?))
    }
}
