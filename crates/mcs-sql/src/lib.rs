// crates/mcs-sql/src/lib.rs
// ============================================================================
// Module: MCS SQL Library
// Description: Public API surface for the T-SQL query backend.
// Purpose: Translate host queries to T-SQL with mapped accessor database functions.
// Dependencies: crate::{error, function, model, translator, tree, visitor}
// ============================================================================

//! ## Overview
//! The SQL backend works over a [`SqlModel`]: entity/table mappings plus the
//! accessor database functions registered on it. Accessors are written as
//! static extensions over the raw stored column (`to_string(p.RawName,
//! culture)`). Registering one classifies it on the spot, so a bad signature
//! fails while the model is built, not when a query runs.
//!
//! Method calls are offered to each [`SqlMethodTranslator`] in turn; the
//! first one returning a node wins.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod error;
pub mod function;
pub mod model;
pub mod translator;
pub mod tree;
pub mod visitor;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use error::SqlError;
pub use function::DbFunction;
pub use function::McsGetStringTranslator;
pub use function::SqlAccessorAdapter;
pub use model::EntityMapping;
pub use model::SqlModel;
pub use translator::SqlMethodTranslator;
pub use translator::TextFunctionTranslator;
pub use tree::SqlExpr;
pub use tree::SqlLiteral;
pub use tree::SqlSelect;
pub use visitor::SqlTranslator;
pub use visitor::SqlVisitor;
