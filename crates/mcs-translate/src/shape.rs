// crates/mcs-translate/src/shape.rs
// ============================================================================
// Module: Overload Classifier
// Description: The seven recognized accessor signatures and their classifier.
// Purpose: Map a static parameter signature to exactly one shape or reject it.
// Dependencies: crate::{error, param}
// ============================================================================

//! ## Overview
//! Every accessor overload takes some ordered subset of
//! `{Culture, Boolean, FallbackPolicy}`:
//!
//! | Shape | Params | Culture | Use fallback | Policy |
//! |---|---|---|---|---|
//! | S0 | () | ambient | true | default |
//! | S1 | (Culture) | arg0 | true | default |
//! | S2 | (Boolean) | ambient | arg0 | default |
//! | S3 | (FallbackPolicy) | ambient | true | arg0 ?? default |
//! | S4 | (Culture, Boolean) | arg0 | arg1 | default |
//! | S5 | (FallbackPolicy, Culture) | arg1 | true | arg0 ?? default |
//! | S6 | (FallbackPolicy, Culture, Boolean) | arg1 | arg2 | arg0 ?? default |
//!
//! Matching is positional and exact. No shape is picked by elimination and
//! anything off the table is rejected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use crate::error::TranslateError;
use crate::param::CallForm;
use crate::param::ParamType;
use crate::param::signature_text;

// ============================================================================
// SECTION: Argument Sources
// ============================================================================

/// Where the culture comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CultureSource {
    /// Ambient UI culture of the translation context.
    Ambient,
    /// Argument at the given index.
    Argument(usize),
}

/// Where the use-fallback flag comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagSource {
    /// Always true.
    AlwaysTrue,
    /// Argument at the given index.
    Argument(usize),
}

/// Where the fallback policy comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicySource {
    /// Default policy of the translation context.
    Default,
    /// Argument at the given index; null means the default policy.
    ArgumentOrDefault(usize),
}

// ============================================================================
// SECTION: Shapes
// ============================================================================

/// One of the seven recognized accessor signatures.
///
/// # Invariants
/// - Each shape fixes exactly one culture, flag and policy source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// `()`
    S0,
    /// `(Culture)`
    S1,
    /// `(Boolean)`
    S2,
    /// `(FallbackPolicy)`
    S3,
    /// `(Culture, Boolean)`
    S4,
    /// `(FallbackPolicy, Culture)`
    S5,
    /// `(FallbackPolicy, Culture, Boolean)`
    S6,
}

impl Shape {
    /// All shapes in table order.
    pub const ALL: [Self; 7] = [Self::S0, Self::S1, Self::S2, Self::S3, Self::S4, Self::S5, Self::S6];

    /// Returns the declared parameters, receiver excluded.
    #[must_use]
    pub const fn params(self) -> &'static [ParamType] {
        match self {
            Self::S0 => &[],
            Self::S1 => &[ParamType::Culture],
            Self::S2 => &[ParamType::Boolean],
            Self::S3 => &[ParamType::FallbackPolicy],
            Self::S4 => &[ParamType::Culture, ParamType::Boolean],
            Self::S5 => &[ParamType::FallbackPolicy, ParamType::Culture],
            Self::S6 => &[ParamType::FallbackPolicy, ParamType::Culture, ParamType::Boolean],
        }
    }

    /// Returns the number of arguments, receiver excluded.
    #[must_use]
    pub const fn arity(self) -> usize {
        self.params().len()
    }

    /// Returns the culture source.
    #[must_use]
    pub const fn culture_source(self) -> CultureSource {
        match self {
            Self::S0 | Self::S2 | Self::S3 => CultureSource::Ambient,
            Self::S1 | Self::S4 => CultureSource::Argument(0),
            Self::S5 | Self::S6 => CultureSource::Argument(1),
        }
    }

    /// Returns the use-fallback flag source.
    #[must_use]
    pub const fn flag_source(self) -> FlagSource {
        match self {
            Self::S0 | Self::S1 | Self::S3 | Self::S5 => FlagSource::AlwaysTrue,
            Self::S2 => FlagSource::Argument(0),
            Self::S4 => FlagSource::Argument(1),
            Self::S6 => FlagSource::Argument(2),
        }
    }

    /// Returns the policy source.
    #[must_use]
    pub const fn policy_source(self) -> PolicySource {
        match self {
            Self::S0 | Self::S1 | Self::S2 | Self::S4 => PolicySource::Default,
            Self::S3 | Self::S5 | Self::S6 => PolicySource::ArgumentOrDefault(0),
        }
    }

    /// Returns the short label (`S0` .. `S6`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::S0 => "S0",
            Self::S1 => "S1",
            Self::S2 => "S2",
            Self::S3 => "S3",
            Self::S4 => "S4",
            Self::S5 => "S5",
            Self::S6 => "S6",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// SECTION: Classification
// ============================================================================

/// Classifies a declared parameter list.
///
/// For [`CallForm::Extension`] the first parameter is the receiver and is
/// skipped before matching.
///
/// # Errors
///
/// Returns [`TranslateError::UnsupportedSignature`] when the signature is not
/// one of the seven shapes.
pub fn classify(params: &[ParamType], form: CallForm) -> Result<Shape, TranslateError> {
    let rest = match form {
        CallForm::Instance => Some(params),
        CallForm::Extension => params.split_first().map(|(_, rest)| rest),
    };
    let shape = match rest {
        Some([]) => Shape::S0,
        Some([ParamType::Culture]) => Shape::S1,
        Some([ParamType::Boolean]) => Shape::S2,
        Some([ParamType::FallbackPolicy]) => Shape::S3,
        Some([ParamType::Culture, ParamType::Boolean]) => Shape::S4,
        Some([ParamType::FallbackPolicy, ParamType::Culture]) => Shape::S5,
        Some([ParamType::FallbackPolicy, ParamType::Culture, ParamType::Boolean]) => Shape::S6,
        _ => {
            return Err(TranslateError::UnsupportedSignature {
                signature: signature_text(params),
            });
        }
    };
    Ok(shape)
}
