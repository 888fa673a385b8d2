// crates/mcs-config/src/lib.rs
// ============================================================================
// Module: MCS Config Library
// Description: Configuration model for localized-string translation.
// Purpose: Load and validate `mcs-i18n.toml` and build runtime settings from it.
// Dependencies: crate::config
// ============================================================================

//! ## Overview
//! Configuration is read once at setup. [`I18nConfig::load`] applies path,
//! size and encoding guards before parsing, and every section is validated
//! fail-closed before anything is built from it.

pub mod config;


pub use config::CONFIG_ENV_VAR;
pub use config::ConfigError;
pub use config::DEFAULT_CONFIG_NAME;
pub use config::FallbackConfig;
pub use config::FallbackPolicyKind;
pub use config::GlobalizationConfig;
pub use config::I18nConfig;
pub use config::SqlConfig;
pub use config::StorageConfig;
pub use config::StorageEncoding;
