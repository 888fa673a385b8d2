// system-tests/src/config/env.rs
// ============================================================================
// Module: System Test Environment
// Description: Environment-backed configuration for system tests.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid UTF-8 fails closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for system test configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemTestEnv {
    /// Optional `mcs-i18n.toml` used instead of the built-in fixture config.
    ConfigPath,
    /// Optional tracing filter directive for test log output.
    LogFilter,
    /// Optional proptest case count override (positive integer).
    PropCases,
}

impl SystemTestEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConfigPath => "MCS_SYSTEM_TEST_CONFIG",
            Self::LogFilter => "MCS_SYSTEM_TEST_LOG",
            Self::PropCases => "MCS_SYSTEM_TEST_PROPTEST_CASES",
        }
    }
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Typed system test configuration derived from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SystemTestConfig {
    /// Optional config file override.
    pub config_path: Option<PathBuf>,
    /// Optional tracing filter directive.
    pub log_filter: Option<String>,
    /// Optional proptest case count.
    pub prop_cases: Option<u32>,
}

impl SystemTestConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when an environment value is not valid UTF-8, is empty,
    /// or fails validation (for example, a zero case count).
    pub fn load() -> Result<Self, String> {
        let config_path = read_env_nonempty(SystemTestEnv::ConfigPath.as_str())?.map(PathBuf::from);
        let log_filter = read_env_nonempty(SystemTestEnv::LogFilter.as_str())?;
        let prop_cases = read_env_nonempty(SystemTestEnv::PropCases.as_str())?
            .map(|value| parse_positive(SystemTestEnv::PropCases.as_str(), &value))
            .transpose()?;
        Ok(Self {
            config_path,
            log_filter,
            prop_cases,
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns an error when the environment variable contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, String> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string().map(Some).map_err(|_| format!("{name} must be valid UTF-8"))
    })
}

/// Reads an environment variable and rejects empty values.
///
/// # Errors
///
/// Returns an error when the variable is set but empty or whitespace.
fn read_env_nonempty(name: &str) -> Result<Option<String>, String> {
    match read_env_strict(name)? {
        Some(value) if value.trim().is_empty() => Err(format!("{name} must not be empty")),
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}

/// Parses a positive integer from an environment variable string.
///
/// # Errors
///
/// Returns an error when the value is non-numeric or zero.
fn parse_positive(name: &str, raw: &str) -> Result<u32, String> {
    let value: u32 = raw.trim().parse().map_err(|_| format!("{name} must be a positive integer"))?;
    if value == 0 {
        return Err(format!("{name} must be greater than zero"));
    }
    Ok(value)
}
