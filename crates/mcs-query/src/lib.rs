// crates/mcs-query/src/lib.rs
// ============================================================================
// Module: MCS Query Library
// Description: Public API surface for host query expressions.
// Purpose: Model filter/sort/projection expressions before backend translation.
// Dependencies: crate::{eval, expr, query, value}
// ============================================================================

//! ## Overview
//! Application code writes queries as [`Query`] values over [`Expr`] trees.
//! Backends walk these trees and translate them; closed sub-expressions
//! (constants, captured variables, and operators over them) are evaluated on
//! the host through [`Scope`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod eval;
pub mod expr;
pub mod query;
pub mod value;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use eval::Scope;
pub use expr::CompareOp;
pub use expr::Expr;
pub use expr::LogicalOp;
pub use expr::MethodCall;
pub use expr::MethodRef;
pub use query::Query;
pub use query::SortOrder;
pub use value::Value;
