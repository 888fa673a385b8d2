// crates/mcs-translate/src/catalog.rs
// ============================================================================
// Module: Accessor Catalog
// Description: The fixed set of localized-string accessor method identities.
// Purpose: Recognize accessor calls by identity so other methods stay untouched.
// Dependencies: crate::{error, param, shape}
// ============================================================================

//! ## Overview
//! Two method names times seven shapes give fourteen overloads. A backend
//! builds the catalog for its call form once and looks calls up by
//! `(name, form, declared params)`; anything not in the catalog is not an
//! accessor call and must be left to the backend.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use crate::error::TranslateError;
use crate::param::CallForm;
use crate::param::ParamType;
use crate::param::signature_text;
use crate::shape::Shape;
use crate::shape::classify;

// ============================================================================
// SECTION: Accessor Names
// ============================================================================

/// Accessor method name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessorName {
    /// `to_string`
    ToString,
    /// `get_string`
    GetString,
}

impl AccessorName {
    /// Both accessor names.
    pub const ALL: [Self; 2] = [Self::ToString, Self::GetString];

    /// Returns the method name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToString => "to_string",
            Self::GetString => "get_string",
        }
    }

    /// Parses a method name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|accessor| accessor.as_str() == name)
    }
}

impl fmt::Display for AccessorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Method Identities
// ============================================================================

/// Identity of one accessor overload.
///
/// # Invariants
/// - For [`CallForm::Extension`], `params[0]` is the receiver.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodIdentity {
    /// Method name.
    pub name: AccessorName,
    /// Invocation form.
    pub form: CallForm,
    /// Declared parameters.
    pub params: Vec<ParamType>,
}

impl MethodIdentity {
    /// Classifies this identity.
    ///
    /// # Errors
    ///
    /// Returns [`TranslateError::UnsupportedSignature`] when the parameters do
    /// not form a recognized shape.
    pub fn classify(&self) -> Result<Shape, TranslateError> {
        classify(&self.params, self.form)
    }

    /// Returns true when a call with this name, form and params is this identity.
    #[must_use]
    pub fn matches(&self, name: &str, form: CallForm, params: &[ParamType]) -> bool {
        self.name.as_str() == name && self.form == form && self.params == params
    }
}

impl fmt::Display for MethodIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, signature_text(&self.params))
    }
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// The fourteen accessor overloads for one call form.
///
/// # Invariants
/// - Every entry's shape is the classification of its identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessorCatalog {
    /// Identities paired with their shapes.
    entries: Vec<(MethodIdentity, Shape)>,
}

impl AccessorCatalog {
    /// Catalog of instance accessors (`value.to_string(culture)`).
    #[must_use]
    pub fn instance() -> Self {
        Self::build(CallForm::Instance, None)
    }

    /// Catalog of extension accessors (`to_string(column, culture)`) whose
    /// first parameter has type `receiver`.
    #[must_use]
    pub fn extension(receiver: ParamType) -> Self {
        Self::build(CallForm::Extension, Some(receiver))
    }

    /// Builds all name/shape combinations.
    fn build(form: CallForm, receiver: Option<ParamType>) -> Self {
        let mut entries = Vec::with_capacity(AccessorName::ALL.len() * Shape::ALL.len());
        for name in AccessorName::ALL {
            for shape in Shape::ALL {
                let params = receiver.into_iter().chain(shape.params().iter().copied()).collect();
                entries.push((
                    MethodIdentity {
                        name,
                        form,
                        params,
                    },
                    shape,
                ));
            }
        }
        Self {
            entries,
        }
    }

    /// Looks up a call; returns the accessor name and shape when it is one of
    /// the catalog's overloads.
    #[must_use]
    pub fn lookup(
        &self,
        name: &str,
        form: CallForm,
        params: &[ParamType],
    ) -> Option<(AccessorName, Shape)> {
        self.entries
            .iter()
            .find(|(identity, _)| identity.matches(name, form, params))
            .map(|(identity, shape)| (identity.name, *shape))
    }

    /// Iterates the catalog's identities.
    pub fn identities(&self) -> impl Iterator<Item = &MethodIdentity> {
        self.entries.iter().map(|(identity, _)| identity)
    }

    /// Returns the number of overloads.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
