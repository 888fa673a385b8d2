// crates/mcs-config/src/config.rs
// ============================================================================
// Module: I18n Configuration
// Description: TOML model, load guards and validation for `mcs-i18n.toml`.
// Purpose: Build globalization settings, translation context and storage
//          formatter from one validated file.
// Dependencies: mcs-core, mcs-translate, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! ```toml
//! [globalization]
//! ui_culture = "ru-RU"
//!
//! [fallback]
//! policy = "chains"
//! chains = [["kz-KZ", "kz", "ru"], ["*", "en"]]
//! unmatched = "requested_only"
//!
//! [storage]
//! namespace = "http://custis.ru/i18n"
//! encoding = "utf-8"
//!
//! [sql]
//! schema = "dbo"
//! ```
//!
//! Every section is optional. Unknown keys are rejected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use mcs_core::ChainsFallbackPolicy;
use mcs_core::CultureName;
use mcs_core::DEFAULT_NAMESPACE;
use mcs_core::GlobalizationSettings;
use mcs_core::NoFallbackPolicy;
use mcs_core::ParentCultureFallbackPolicy;
use mcs_core::SharedPolicy;
use mcs_core::UnmatchedChain;
use mcs_core::XmlEncoding;
use mcs_core::XmlFormatter;
use mcs_translate::TranslationContext;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Default config file name, resolved against the working directory.
pub const DEFAULT_CONFIG_NAME: &str = "mcs-i18n.toml";
/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "MCS_I18N_CONFIG";
/// Maximum config file size in bytes.
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum number of configured chains.
const MAX_CHAINS: usize = 64;
/// Maximum number of patterns per chain.
const MAX_CHAIN_PATTERNS: usize = 32;
/// Maximum number of tail cultures for the parent policy.
const MAX_TAIL_CULTURES: usize = 32;
/// Maximum SQL schema name length.
const MAX_SCHEMA_LENGTH: usize = 128;
/// Default SQL schema.
const DEFAULT_SQL_SCHEMA: &str = "dbo";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("config io error: {0}")]
    Io(String),
    /// The config file is not valid TOML for this model.
    #[error("config parse error: {0}")]
    Parse(String),
    /// The config failed validation.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Sections
// ============================================================================

/// `[globalization]` section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GlobalizationConfig {
    /// Ambient culture; absent means the invariant culture.
    #[serde(default)]
    pub ui_culture: Option<String>,
}

/// Fallback policy implementation selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicyKind {
    /// Ordered chain table.
    Chains,
    /// Identifier-prefix walk plus tail.
    #[default]
    Parent,
    /// No fallback at all.
    None,
}

/// `[fallback]` section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FallbackConfig {
    /// Policy implementation.
    #[serde(default)]
    pub policy: FallbackPolicyKind,
    /// Chain table for `policy = "chains"`.
    #[serde(default)]
    pub chains: Vec<Vec<String>>,
    /// Chain-table behavior when no head matches.
    #[serde(default)]
    pub unmatched: UnmatchedChain,
    /// Cultures appended by `policy = "parent"`.
    #[serde(default)]
    pub tail: Vec<String>,
}

/// Declared XML encoding of stored values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StorageEncoding {
    /// `utf-8`.
    #[default]
    #[serde(rename = "utf-8")]
    Utf8,
    /// `utf-16`.
    #[serde(rename = "utf-16")]
    Utf16,
}

/// `[storage]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Default namespace of the stored XML root.
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// Declared encoding label.
    #[serde(default)]
    pub encoding: StorageEncoding,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            encoding: StorageEncoding::default(),
        }
    }
}

/// `[sql]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SqlConfig {
    /// Schema of mapped tables and the `mcs_get_string` function.
    #[serde(default = "default_schema")]
    pub schema: String,
}

impl Default for SqlConfig {
    fn default() -> Self {
        Self {
            schema: default_schema(),
        }
    }
}

/// Serde default for [`StorageConfig::namespace`].
fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

/// Serde default for [`SqlConfig::schema`].
fn default_schema() -> String {
    DEFAULT_SQL_SCHEMA.to_string()
}

// ============================================================================
// SECTION: Root Config
// ============================================================================

/// Root of `mcs-i18n.toml`.
///
/// # Invariants
/// - A value returned by [`I18nConfig::load`] or [`I18nConfig::from_toml`]
///   has passed [`I18nConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct I18nConfig {
    /// Ambient culture settings.
    #[serde(default)]
    pub globalization: GlobalizationConfig,
    /// Default fallback policy.
    #[serde(default)]
    pub fallback: FallbackConfig,
    /// XML storage format.
    #[serde(default)]
    pub storage: StorageConfig,
    /// SQL backend options.
    #[serde(default)]
    pub sql: SqlConfig,
}

impl I18nConfig {
    /// Loads and validates the config file.
    ///
    /// The path is `path` when given, else the value of [`CONFIG_ENV_VAR`],
    /// else [`DEFAULT_CONFIG_NAME`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the path is invalid, the file is
    /// unreadable, oversized, not UTF-8, fails to parse or fails validation.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = resolve_path(path, env::var_os(CONFIG_ENV_VAR))?;
        validate_path(&path)?;
        let metadata = fs::metadata(&path).map_err(|err| ConfigError::Io(err.to_string()))?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let bytes = fs::read(&path).map_err(|err| ConfigError::Io(err.to_string()))?;
        let text = String::from_utf8(bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml(&text)
    }

    /// Parses and validates config text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed TOML or unknown keys and
    /// [`ConfigError::Invalid`] when validation fails.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates every section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ui_culture()?;
        self.validate_fallback()?;
        if self.storage.namespace.trim().is_empty() {
            return Err(invalid("storage.namespace must be non-empty"));
        }
        let schema = &self.sql.schema;
        if schema.trim().is_empty() {
            return Err(invalid("sql.schema must be non-empty"));
        }
        if schema.len() > MAX_SCHEMA_LENGTH {
            return Err(invalid("sql.schema too long"));
        }
        Ok(())
    }

    /// Validates the `[fallback]` section.
    fn validate_fallback(&self) -> Result<(), ConfigError> {
        let fallback = &self.fallback;
        if fallback.chains.len() > MAX_CHAINS {
            return Err(invalid("fallback.chains exceeds 64 chains"));
        }
        if fallback.chains.iter().any(|chain| chain.len() > MAX_CHAIN_PATTERNS) {
            return Err(invalid("fallback chain exceeds 32 patterns"));
        }
        if fallback.tail.len() > MAX_TAIL_CULTURES {
            return Err(invalid("fallback.tail exceeds 32 cultures"));
        }
        match fallback.policy {
            FallbackPolicyKind::Chains => {
                if fallback.chains.is_empty() {
                    return Err(invalid("chains policy requires fallback.chains"));
                }
                if !fallback.tail.is_empty() {
                    return Err(invalid("fallback.tail requires policy = \"parent\""));
                }
            }
            FallbackPolicyKind::Parent | FallbackPolicyKind::None => {
                if !fallback.chains.is_empty() {
                    return Err(invalid("fallback.chains requires policy = \"chains\""));
                }
                if fallback.policy == FallbackPolicyKind::None && !fallback.tail.is_empty() {
                    return Err(invalid("fallback.tail requires policy = \"parent\""));
                }
            }
        }
        self.fallback_policy().map(|_| ())
    }

    /// Returns the configured ambient culture.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the identifier is malformed.
    pub fn ui_culture(&self) -> Result<CultureName, ConfigError> {
        match &self.globalization.ui_culture {
            Some(raw) => CultureName::parse(raw)
                .map_err(|err| ConfigError::Invalid(format!("globalization.ui_culture: {err}"))),
            None => Ok(CultureName::invariant()),
        }
    }

    /// Builds the configured default fallback policy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a chain or tail culture is
    /// malformed.
    pub fn fallback_policy(&self) -> Result<SharedPolicy, ConfigError> {
        let fallback = &self.fallback;
        let policy: SharedPolicy = match fallback.policy {
            FallbackPolicyKind::Chains => {
                let policy = ChainsFallbackPolicy::from_patterns(&fallback.chains)
                    .map_err(|err| ConfigError::Invalid(format!("fallback.{err}")))?;
                Arc::new(policy.with_unmatched(fallback.unmatched))
            }
            FallbackPolicyKind::Parent => {
                let tail = fallback
                    .tail
                    .iter()
                    .map(|raw| CultureName::parse(raw))
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|err| ConfigError::Invalid(format!("fallback.tail: {err}")))?;
                Arc::new(ParentCultureFallbackPolicy::new(tail))
            }
            FallbackPolicyKind::None => Arc::new(NoFallbackPolicy),
        };
        Ok(policy)
    }

    /// Builds process globalization settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the policy cannot be built.
    pub fn globalization_settings(&self) -> Result<GlobalizationSettings, ConfigError> {
        Ok(GlobalizationSettings::new(self.fallback_policy()?))
    }

    /// Builds the translation context for query backends.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the culture or policy is invalid.
    pub fn translation_context(&self) -> Result<TranslationContext, ConfigError> {
        Ok(TranslationContext::from_settings(self.ui_culture()?, &self.globalization_settings()?))
    }

    /// Builds the XML storage formatter.
    #[must_use]
    pub fn xml_formatter(&self) -> XmlFormatter {
        let encoding = match self.storage.encoding {
            StorageEncoding::Utf8 => XmlEncoding::Utf8,
            StorageEncoding::Utf16 => XmlEncoding::Utf16,
        };
        XmlFormatter::new(self.storage.namespace.clone()).with_encoding(encoding)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds an invalid-config error.
fn invalid(message: &str) -> ConfigError {
    ConfigError::Invalid(message.to_string())
}

/// Picks the config path: explicit, then environment, then default name.
pub(crate) fn resolve_path(
    path: Option<&Path>,
    env_value: Option<OsString>,
) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    match env_value {
        Some(value) => {
            let value = value
                .into_string()
                .map_err(|_| invalid("MCS_I18N_CONFIG must be valid utf-8"))?;
            if value.trim().is_empty() {
                return Err(invalid("MCS_I18N_CONFIG must be non-empty"));
            }
            Ok(PathBuf::from(value))
        }
        None => Ok(PathBuf::from(DEFAULT_CONFIG_NAME)),
    }
}

/// Rejects overlong paths before touching the filesystem.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(invalid("config path exceeds max length"));
    }
    for component in path.components() {
        if component.as_os_str().to_string_lossy().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(invalid("config path component too long"));
        }
    }
    Ok(())
}
