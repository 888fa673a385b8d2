// crates/mcs-query/src/eval.rs
// ============================================================================
// Module: Closed Expression Evaluation
// Description: Host-side evaluator for expressions without row dependence.
// Purpose: Give backends the "evaluate a closed expression" capability.
// Dependencies: crate::{expr, value}, mcs-core, mcs-translate
// ============================================================================

//! ## Overview
//! A [`Scope`] binds captured variable names to values and folds closed
//! expressions down to a single [`Value`]. Row reads fail with
//! [`EvalError::RowDependent`]; method calls are not run on the host.
//! Boolean connectives, coalescing and conditionals short-circuit, so a
//! branch that would read row data is never touched when it is not taken.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cmp::Ordering;
use std::collections::BTreeMap;

use mcs_core::CultureName;
use mcs_translate::EvalError;
use mcs_translate::HostValue;

use crate::expr::CompareOp;
use crate::expr::Expr;
use crate::expr::LogicalOp;
use crate::value::Value;

// ============================================================================
// SECTION: Scope
// ============================================================================

/// Captured-variable bindings of the host code that built a query.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    /// Variable bindings by name.
    bindings: BTreeMap<String, Value>,
}

impl Scope {
    /// Creates an empty scope.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bindings: BTreeMap::new(),
        }
    }

    /// Returns the scope with `name` bound to `value`.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.bind(name, value);
        self
    }

    /// Binds `name` to `value`, replacing a previous binding.
    pub fn bind(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.bindings.insert(name.into(), value.into());
    }

    /// Evaluates a closed expression.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::RowDependent`] on a row read that must be
    /// evaluated, [`EvalError::Unbound`] on an unknown variable, and
    /// [`EvalError::Unsupported`] on type errors or method calls.
    pub fn evaluate(&self, expr: &Expr) -> Result<Value, EvalError> {
        match expr {
            Expr::Constant(value) => Ok(value.clone()),
            Expr::Captured(name) => {
                self.bindings.get(name).cloned().ok_or_else(|| EvalError::Unbound(name.clone()))
            }
            Expr::Property {
                alias,
                property,
                ..
            } => Err(EvalError::RowDependent(format!("{alias}.{property}"))),
            Expr::CultureFromName(inner) => match self.evaluate(inner)? {
                Value::Text(name) => CultureName::parse(&name)
                    .map(Value::Culture)
                    .map_err(|err| EvalError::Unsupported(err.to_string())),
                Value::Null => Ok(Value::Null),
                other => Err(type_error("Text", &other)),
            },
            Expr::Call(call) => {
                if let Some(row) = first_row_read(expr) {
                    return Err(EvalError::RowDependent(row));
                }
                Err(EvalError::Unsupported(format!("method call `{}`", call.method)))
            }
            Expr::Compare {
                op,
                left,
                right,
            } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                compare(*op, &left, &right).map(Value::Bool)
            }
            Expr::Logical {
                op,
                left,
                right,
            } => {
                let left = self.evaluate_bool(left)?;
                match (op, left) {
                    (LogicalOp::And, false) => Ok(Value::Bool(false)),
                    (LogicalOp::Or, true) => Ok(Value::Bool(true)),
                    _ => self.evaluate_bool(right).map(Value::Bool),
                }
            }
            Expr::Not(inner) => self.evaluate_bool(inner).map(|flag| Value::Bool(!flag)),
            Expr::Coalesce(left, right) => match self.evaluate(left)? {
                Value::Null => self.evaluate(right),
                value => Ok(value),
            },
            Expr::Conditional {
                test,
                if_true,
                if_false,
            } => {
                if self.evaluate_bool(test)? {
                    self.evaluate(if_true)
                } else {
                    self.evaluate(if_false)
                }
            }
        }
    }

    /// Evaluates a closed expression into an accessor argument value.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`Scope::evaluate`].
    pub fn evaluate_host(&self, expr: &Expr) -> Result<HostValue, EvalError> {
        self.evaluate(expr).map(Value::into_host)
    }

    /// Evaluates an expression that must produce a boolean.
    fn evaluate_bool(&self, expr: &Expr) -> Result<bool, EvalError> {
        match self.evaluate(expr)? {
            Value::Bool(flag) => Ok(flag),
            other => Err(type_error("Boolean", &other)),
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Compares two values; ordering is defined for integers and text only.
fn compare(op: CompareOp, left: &Value, right: &Value) -> Result<bool, EvalError> {
    match op {
        CompareOp::Eq => return Ok(left == right),
        CompareOp::Ne => return Ok(left != right),
        _ => {}
    }
    let ordering = match (left, right) {
        (Value::Int(left), Value::Int(right)) => left.cmp(right),
        (Value::Text(left), Value::Text(right)) => left.cmp(right),
        _ => {
            return Err(EvalError::Unsupported(format!(
                "cannot order {} against {}",
                left.kind(),
                right.kind()
            )));
        }
    };
    Ok(match op {
        CompareOp::Lt => ordering == Ordering::Less,
        CompareOp::Le => ordering != Ordering::Greater,
        CompareOp::Gt => ordering == Ordering::Greater,
        CompareOp::Ge | CompareOp::Eq | CompareOp::Ne => ordering != Ordering::Less,
    })
}

/// Builds a type error.
fn type_error(expected: &str, found: &Value) -> EvalError {
    EvalError::Unsupported(format!("expected {expected}, found {}", found.kind()))
}

/// Returns the first row read inside an expression, as `alias.property`.
fn first_row_read(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Constant(_) | Expr::Captured(_) => None,
        Expr::Property {
            alias,
            property,
            ..
        } => Some(format!("{alias}.{property}")),
        Expr::CultureFromName(inner) | Expr::Not(inner) => first_row_read(inner),
        Expr::Call(call) => call
            .receiver
            .as_deref()
            .and_then(first_row_read)
            .or_else(|| call.args.iter().find_map(first_row_read)),
        Expr::Compare {
            left,
            right,
            ..
        }
        | Expr::Logical {
            left,
            right,
            ..
        }
        | Expr::Coalesce(left, right) => first_row_read(left).or_else(|| first_row_read(right)),
        Expr::Conditional {
            test,
            if_true,
            if_false,
        } => first_row_read(test)
            .or_else(|| first_row_read(if_true))
            .or_else(|| first_row_read(if_false)),
    }
}
