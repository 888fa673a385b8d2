// crates/mcs-query/src/query.rs
// ============================================================================
// Module: Query Model
// Description: Single-entity query with filter, ordering and projection.
// Purpose: Give backends one unit of translation per query compilation.
// Dependencies: crate::expr
// ============================================================================

//! ## Overview
//! A [`Query`] reads one entity under an alias. An empty projection selects
//! the entity itself.

use crate::expr::Expr;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Ascending.
    #[default]
    Ascending,
    /// Descending.
    Descending,
}

/// Single-entity query.
///
/// # Invariants
/// - `alias` names the entity inside every expression of the query.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// Mapped entity name.
    pub entity: String,
    /// Entity alias.
    pub alias: String,
    /// Projected expressions; empty selects the entity.
    pub select: Vec<Expr>,
    /// Filter predicate.
    pub filter: Option<Expr>,
    /// Sort keys in priority order.
    pub order_by: Vec<(Expr, SortOrder)>,
}

impl Query {
    /// Starts a query over `entity` aliased as `alias`.
    #[must_use]
    pub fn from(entity: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            alias: alias.into(),
            select: Vec::new(),
            filter: None,
            order_by: Vec::new(),
        }
    }

    /// Adds a projected expression.
    #[must_use]
    pub fn select(mut self, expr: Expr) -> Self {
        self.select.push(expr);
        self
    }

    /// Adds a filter predicate, and-ing it with any existing one.
    #[must_use]
    pub fn filter(mut self, predicate: Expr) -> Self {
        self.filter = Some(match self.filter.take() {
            Some(existing) => Expr::and(existing, predicate),
            None => predicate,
        });
        self
    }

    /// Adds a sort key.
    #[must_use]
    pub fn order_by(mut self, key: Expr, order: SortOrder) -> Self {
        self.order_by.push((key, order));
        self
    }
}
