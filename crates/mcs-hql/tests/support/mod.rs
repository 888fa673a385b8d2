// crates/mcs-hql/tests/support/mod.rs
// ============================================================================
// Module: Test Support
// Description: Shared result helpers and query fixtures for HQL tests.
// ============================================================================
//! ## Overview
//! Shared test helpers for consistent Result-based assertions, plus the
//! `Product` fixtures the HQL tests query.

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
use mcs_translate::ParamType;
use mcs_translate::TranslationContext;

// ========================================================================
// Test Result Helpers
// ========================================================================

/// Standard result type used across HQL integration tests.
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
// Query Fixtures
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

/// Row read of the localized `p.Name` property.
pub fn name() -> Expr {
    Expr::property("p", "Name", ParamType::MultiCulturalString)
}

/// Row read of the plain `p.Code` property.
pub fn code() -> Expr {
    Expr::property("p", "Code", ParamType::Text)
}

/// Instance accessor call on `p.Name`.
pub fn accessor(method: &str, params: Vec<ParamType>, args: Vec<Expr>) -> Expr {
    Expr::call(name(), MethodRef::instance(method, params), args)
}
