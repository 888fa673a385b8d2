// crates/mcs-hql/src/tree.rs
// ============================================================================
// Module: HQL Tree
// Description: HQL syntax nodes and their text rendering.
// Purpose: Hold translated queries in a form the dialect can check and render.
// Dependencies: mcs-query
// ============================================================================

//! ## Overview
//! Nodes render to HQL text with [`HqlNode::render`]. Text literals use
//! single quotes with embedded quotes doubled.

use std::fmt::Write;

use mcs_query::SortOrder;

/// HQL literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HqlLiteral {
    /// `null`
    Null,
    /// `true` / `false`
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Quoted text.
    Text(String),
}

/// HQL syntax node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HqlNode {
    /// Entity alias.
    Alias(String),
    /// Property access `base.name`.
    Dot(Box<HqlNode>, String),
    /// Literal.
    Constant(HqlLiteral),
    /// Function call.
    MethodCall {
        /// Function name.
        name: String,
        /// Arguments.
        args: Vec<HqlNode>,
    },
    /// Binary operator.
    Binary {
        /// Operator token.
        op: &'static str,
        /// Left operand.
        left: Box<HqlNode>,
        /// Right operand.
        right: Box<HqlNode>,
    },
    /// `operand is null` / `operand is not null`.
    IsNull {
        /// Tested operand.
        operand: Box<HqlNode>,
        /// True for `is not null`.
        negated: bool,
    },
    /// `not (operand)`.
    Not(Box<HqlNode>),
    /// `case when test then a else b end`.
    Case {
        /// Condition.
        test: Box<HqlNode>,
        /// Value when the condition holds.
        if_true: Box<HqlNode>,
        /// Value otherwise.
        if_false: Box<HqlNode>,
    },
    /// Full query.
    Query {
        /// Projections; empty selects the alias.
        select: Vec<HqlNode>,
        /// Entity name.
        entity: String,
        /// Entity alias.
        alias: String,
        /// Filter.
        filter: Option<Box<HqlNode>>,
        /// Sort keys.
        order_by: Vec<(HqlNode, SortOrder)>,
    },
}

impl HqlNode {
    /// Renders the node to HQL text.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    /// Appends the rendering of this node.
    fn render_into(&self, out: &mut String) {
        match self {
            Self::Alias(alias) => out.push_str(alias),
            Self::Dot(base, name) => {
                base.render_into(out);
                out.push('.');
                out.push_str(name);
            }
            Self::Constant(literal) => render_literal(literal, out),
            Self::MethodCall {
                name,
                args,
            } => {
                out.push_str(name);
                out.push('(');
                render_list(args, out);
                out.push(')');
            }
            Self::Binary {
                op,
                left,
                right,
            } => {
                out.push('(');
                left.render_into(out);
                let _ = write!(out, " {op} ");
                right.render_into(out);
                out.push(')');
            }
            Self::IsNull {
                operand,
                negated,
            } => {
                operand.render_into(out);
                out.push_str(if *negated { " is not null" } else { " is null" });
            }
            Self::Not(inner) => {
                out.push_str("not (");
                inner.render_into(out);
                out.push(')');
            }
            Self::Case {
                test,
                if_true,
                if_false,
            } => {
                out.push_str("case when ");
                test.render_into(out);
                out.push_str(" then ");
                if_true.render_into(out);
                out.push_str(" else ");
                if_false.render_into(out);
                out.push_str(" end");
            }
            Self::Query {
                select,
                entity,
                alias,
                filter,
                order_by,
            } => {
                if !select.is_empty() {
                    out.push_str("select ");
                    render_list(select, out);
                    out.push(' ');
                }
                let _ = write!(out, "from {entity} {alias}");
                if let Some(filter) = filter {
                    out.push_str(" where ");
                    filter.render_into(out);
                }
                for (idx, (key, order)) in order_by.iter().enumerate() {
                    out.push_str(if idx == 0 { " order by " } else { ", " });
                    key.render_into(out);
                    if *order == SortOrder::Descending {
                        out.push_str(" desc");
                    }
                }
            }
        }
    }

    /// Visits this node and every descendant, parents first.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Self)) {
        visit(self);
        match self {
            Self::Alias(_) | Self::Constant(_) => {}
            Self::Dot(inner, _)
            | Self::Not(inner)
            | Self::IsNull {
                operand: inner,
                ..
            } => inner.walk(visit),
            Self::MethodCall {
                args,
                ..
            } => args.iter().for_each(|arg| arg.walk(visit)),
            Self::Binary {
                left,
                right,
                ..
            } => {
                left.walk(visit);
                right.walk(visit);
            }
            Self::Case {
                test,
                if_true,
                if_false,
            } => {
                test.walk(visit);
                if_true.walk(visit);
                if_false.walk(visit);
            }
            Self::Query {
                select,
                filter,
                order_by,
                ..
            } => {
                select.iter().for_each(|node| node.walk(visit));
                if let Some(filter) = filter {
                    filter.walk(visit);
                }
                order_by.iter().for_each(|(key, _)| key.walk(visit));
            }
        }
    }
}

/// Renders a comma-separated node list.
fn render_list(nodes: &[HqlNode], out: &mut String) {
    for (idx, node) in nodes.iter().enumerate() {
        if idx > 0 {
            out.push_str(", ");
        }
        node.render_into(out);
    }
}

/// Renders a literal.
fn render_literal(literal: &HqlLiteral, out: &mut String) {
    match literal {
        HqlLiteral::Null => out.push_str("null"),
        HqlLiteral::Bool(flag) => out.push_str(if *flag { "true" } else { "false" }),
        HqlLiteral::Int(value) => {
            let _ = write!(out, "{value}");
        }
        HqlLiteral::Text(text) => {
            out.push('\'');
            out.push_str(&text.replace('\'', "''"));
            out.push('\'');
        }
    }
}
