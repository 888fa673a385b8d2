// crates/mcs-sql/tests/support/mod.rs
// ============================================================================
// Module: Test Support
// Description: Shared result helpers and the mapped `Product` model for SQL tests.
// ============================================================================
//! ## Overview
//! Shared test helpers for consistent Result-based assertions, plus the
//! `t_product` mapping and accessor call builders.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    dead_code,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use mcs_core::ChainsFallbackPolicy;
use mcs_core::CultureName;
use mcs_query::Expr;
use mcs_query::MethodRef;
use mcs_sql::SqlModel;
use mcs_translate::ParamType;
use mcs_translate::TranslationContext;

// ========================================================================
// Test Result Helpers
// ========================================================================

/// Standard result type used across SQL integration tests.
pub type TestResult<T = ()> = Result<T, Box<dyn Error>>;

/// Lightweight error type for test assertions.
#[derive(Debug)]
struct TestError {
    /// Human-readable failure message.
    message: String,
}

impl fmt::Display for TestError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.message)
    }
}

impl Error for TestError {}

/// Returns an error when a test condition fails.
///
/// # Errors
/// Returns a `TestError` when the condition is false.
pub fn ensure(condition: bool, message: impl Into<String>) -> TestResult {
    if condition {
        Ok(())
    } else {
        Err(Box::new(TestError {
            message: message.into(),
        }))
    }
}

// ========================================================================
// Model Fixtures
// ========================================================================

/// Parses a culture identifier.
pub fn culture(raw: &str) -> TestResult<CultureName> {
    Ok(CultureName::parse(raw)?)
}

/// Context with the given ambient culture and default chain `[["*", "en"]]`.
pub fn context(ui_culture: &str) -> TestResult<TranslationContext> {
    let policy = ChainsFallbackPolicy::from_patterns([vec!["*", "en"]])?;
    Ok(TranslationContext::new(culture(ui_culture)?, Arc::new(policy)))
}

/// Model mapping `Product` to `t_product` with every accessor registered.
pub fn product_model() -> TestResult<SqlModel> {
    let mut model = SqlModel::with_mcs_accessors("dbo")?;
    model
        .entity("Product", "t_product")
        .column("Id", "id_product")
        .column("Code", "code")
        .column("RawName", "name");
    Ok(model)
}

/// Row read of the raw stored `p.RawName` column.
pub fn raw_name() -> Expr {
    Expr::property("p", "RawName", ParamType::Text)
}

/// Row read of the plain `p.Code` column.
pub fn code() -> Expr {
    Expr::property("p", "Code", ParamType::Text)
}

/// Extension accessor call over `p.RawName`; `params` exclude the receiver.
pub fn accessor(method: &str, params: Vec<ParamType>, args: Vec<Expr>) -> Expr {
    let mut declared = vec![ParamType::Text];
    declared.extend(params);
    let mut actual = vec![raw_name()];
    actual.extend(args);
    Expr::call_static(MethodRef::extension(method, declared), actual)
}
