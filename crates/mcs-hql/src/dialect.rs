// crates/mcs-hql/src/dialect.rs
// ============================================================================
// Module: HQL Dialect Functions
// Description: SQL functions known to the target dialect and their arity.
// Purpose: Reject malformed native calls before HQL reaches the database.
// Dependencies: crate::{error, tree}, mcs-core
// ============================================================================

//! ## Overview
//! A dialect registers SQL functions by name. Checking a tree verifies every
//! call of a registered fixed-arity function; unregistered functions pass
//! through untouched.

use std::collections::BTreeMap;

use mcs_core::MCS_GET_STRING;
use mcs_core::MCS_GET_STRING_ARITY;

use crate::error::HqlError;
use crate::tree::HqlNode;

/// SQL function registered with a dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlFunction {
    /// Function name.
    pub name: String,
    /// Fixed arity, or `None` for variadic functions.
    pub arity: Option<usize>,
}

impl SqlFunction {
    /// Fixed-arity function.
    #[must_use]
    pub fn fixed(name: impl Into<String>, arity: usize) -> Self {
        Self {
            name: name.into(),
            arity: Some(arity),
        }
    }

    /// The storage primitive `mcs_get_string`.
    #[must_use]
    pub fn mcs_get_string() -> Self {
        Self::fixed(MCS_GET_STRING, MCS_GET_STRING_ARITY)
    }
}

/// Function table of a target dialect.
#[derive(Debug, Clone, Default)]
pub struct HqlDialect {
    /// Registered functions by name.
    functions: BTreeMap<String, SqlFunction>,
}

impl HqlDialect {
    /// Dialect with `mcs_get_string` and `coalesce` registered.
    #[must_use]
    pub fn with_mcs_functions() -> Self {
        let mut dialect = Self::default();
        dialect.register(SqlFunction::mcs_get_string());
        dialect.register(SqlFunction {
            name: "coalesce".to_string(),
            arity: None,
        });
        dialect
    }

    /// Registers or replaces a function.
    pub fn register(&mut self, function: SqlFunction) {
        self.functions.insert(function.name.clone(), function);
    }

    /// Returns a registered function.
    #[must_use]
    pub fn function(&self, name: &str) -> Option<&SqlFunction> {
        self.functions.get(name)
    }

    /// Checks every call to a registered fixed-arity function in `node`.
    ///
    /// # Errors
    ///
    /// Returns [`HqlError::FunctionArity`] on the first mismatch.
    pub fn check(&self, node: &HqlNode) -> Result<(), HqlError> {
        let mut failure = None;
        node.walk(&mut |current| {
            if failure.is_some() {
                return;
            }
            if let HqlNode::MethodCall {
                name,
                args,
            } = current
                && let Some(expected) = self.function(name).and_then(|function| function.arity)
                && expected != args.len()
            {
                failure = Some(HqlError::FunctionArity {
                    name: name.clone(),
                    expected,
                    found: args.len(),
                });
            }
        });
        failure.map_or(Ok(()), Err)
    }
}
