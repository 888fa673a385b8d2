// crates/mcs-hql/src/lib.rs
// ============================================================================
// Module: MCS HQL Library
// Description: Public API surface for the HQL query backend.
// Purpose: Translate host queries to HQL, routing accessor calls to the shared pipeline.
// Dependencies: crate::{accessor, dialect, error, generator, tree, visitor}
// ============================================================================

//! ## Overview
//! The HQL backend walks a [`mcs_query::Query`] with an [`HqlVisitor`].
//! Method calls are dispatched through an [`HqlGeneratorRegistry`]; the
//! [`McsAccessorGenerator`] claims the fourteen instance accessor overloads
//! and emits `mcs_get_string(target, culture, chain)`. The [`HqlDialect`]
//! checks registered SQL functions before the text leaves the backend.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod accessor;
pub mod dialect;
pub mod error;
pub mod generator;
pub mod tree;
pub mod visitor;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use accessor::HqlAccessorAdapter;
pub use accessor::McsAccessorGenerator;
pub use dialect::HqlDialect;
pub use dialect::SqlFunction;
pub use error::HqlError;
pub use generator::HqlGeneratorRegistry;
pub use generator::HqlMethodGenerator;
pub use tree::HqlLiteral;
pub use tree::HqlNode;
pub use visitor::HqlTranslator;
pub use visitor::HqlVisitor;
