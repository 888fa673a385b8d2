// crates/mcs-sql/src/translator.rs
// ============================================================================
// Module: Method Call Translators
// Description: Extension point turning method calls into SQL expressions.
// Purpose: Let each translator claim the calls it understands.
// Dependencies: crate::{error, tree, visitor}, mcs-query, mcs-translate
// ============================================================================

//! ## Overview
//! A translator returns `Ok(None)` for calls it does not handle. The built-in
//! [`TextFunctionTranslator`] maps `to_lower` / `to_upper` on text.

use std::fmt;

use mcs_query::MethodCall;
use mcs_translate::CallForm;

use crate::error::SqlError;
use crate::tree::SqlExpr;
use crate::visitor::SqlVisitor;

/// Translates method calls it recognizes.
pub trait SqlMethodTranslator: fmt::Debug + Send + Sync {
    /// Returns the SQL for `call`, or `None` when this translator does not
    /// handle it.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError`] when a recognized call cannot be translated.
    fn translate(
        &self,
        call: &MethodCall,
        visitor: &mut SqlVisitor<'_>,
    ) -> Result<Option<SqlExpr>, SqlError>;
}

/// Case-mapping text functions.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFunctionTranslator;

impl SqlMethodTranslator for TextFunctionTranslator {
    fn translate(
        &self,
        call: &MethodCall,
        visitor: &mut SqlVisitor<'_>,
    ) -> Result<Option<SqlExpr>, SqlError> {
        let method = &call.method;
        if method.form != CallForm::Instance || !method.params.is_empty() {
            return Ok(None);
        }
        let name = match method.name.as_str() {
            "to_lower" => "lower",
            "to_upper" => "upper",
            _ => return Ok(None),
        };
        let Some(receiver) = call.receiver.as_deref() else {
            return Ok(None);
        };
        Ok(Some(SqlExpr::Function {
            schema: None,
            name: name.to_string(),
            args: vec![visitor.visit(receiver)?],
        }))
    }
}
