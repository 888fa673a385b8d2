// crates/mcs-hql/src/generator.rs
// ============================================================================
// Module: HQL Method Generators
// Description: Registry of per-method HQL generators.
// Purpose: Let extensions claim method calls and build their HQL.
// Dependencies: crate::{accessor, error, tree, visitor}, mcs-query
// ============================================================================

//! ## Overview
//! The visitor asks the registry for the first generator that supports a
//! method call. Generators see the whole call, receiver included, so they
//! can claim a method only on the receiver type that declares it. Later
//! registrations take precedence over earlier ones.

use std::fmt;

use mcs_query::MethodCall;

use crate::accessor::McsAccessorGenerator;
use crate::error::HqlError;
use crate::tree::HqlNode;
use crate::visitor::HqlVisitor;

/// Builds HQL for the method calls it supports.
pub trait HqlMethodGenerator: fmt::Debug + Send + Sync {
    /// Returns true when this generator handles `call`.
    fn supports(&self, call: &MethodCall) -> bool;

    /// Builds HQL for a supported call.
    ///
    /// # Errors
    ///
    /// Returns [`HqlError`] when the call cannot be expressed in HQL.
    fn build(&self, call: &MethodCall, visitor: &mut HqlVisitor<'_>) -> Result<HqlNode, HqlError>;
}

/// Ordered set of method generators.
#[derive(Debug, Default)]
pub struct HqlGeneratorRegistry {
    /// Generators in registration order.
    generators: Vec<Box<dyn HqlMethodGenerator>>,
}

impl HqlGeneratorRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the localized-string accessor generator merged in.
    #[must_use]
    pub fn with_mcs_accessors() -> Self {
        let mut registry = Self::new();
        registry.merge(Box::new(McsAccessorGenerator::new()));
        registry
    }

    /// Adds a generator; it takes precedence over earlier ones.
    pub fn merge(&mut self, generator: Box<dyn HqlMethodGenerator>) {
        self.generators.push(generator);
    }

    /// Returns the generator for `call`, if any.
    #[must_use]
    pub fn find(&self, call: &MethodCall) -> Option<&dyn HqlMethodGenerator> {
        self.generators.iter().rev().find(|generator| generator.supports(call)).map(Box::as_ref)
    }
}
