// crates/mcs-translate/src/context.rs
// ============================================================================
// Module: Translation Context
// Description: Ambient inputs of translation passed explicitly by the caller.
// Purpose: Replace process-wide culture and policy slots with plain values.
// Dependencies: mcs-core
// ============================================================================

//! ## Overview
//! The ambient UI culture and default fallback policy are read once per call
//! site and frozen into the query. The context is immutable; callers build a
//! new one when either input changes.

use mcs_core::CultureName;
use mcs_core::GlobalizationSettings;
use mcs_core::SharedPolicy;

/// Ambient inputs for one query compilation.
///
/// # Invariants
/// - Never mutated during translation.
#[derive(Debug, Clone)]
pub struct TranslationContext {
    /// Culture used by shapes without a culture argument.
    pub ui_culture: CultureName,
    /// Policy used when no policy (or a null policy) is supplied.
    pub default_policy: SharedPolicy,
}

impl TranslationContext {
    /// Creates a context from explicit inputs.
    #[must_use]
    pub fn new(ui_culture: CultureName, default_policy: SharedPolicy) -> Self {
        Self {
            ui_culture,
            default_policy,
        }
    }

    /// Creates a context using the default policy of `settings`.
    #[must_use]
    pub fn from_settings(ui_culture: CultureName, settings: &GlobalizationSettings) -> Self {
        Self::new(ui_culture, settings.default_policy.clone())
    }

    /// Returns a copy with a different ambient culture.
    #[must_use]
    pub fn with_ui_culture(&self, ui_culture: CultureName) -> Self {
        Self::new(ui_culture, self.default_policy.clone())
    }
}
