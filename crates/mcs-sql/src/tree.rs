// crates/mcs-sql/src/tree.rs
// ============================================================================
// Module: SQL Expression Tree
// Description: T-SQL expression and select nodes with text rendering.
// Purpose: Hold translated queries and render them for SQL Server.
// Dependencies: mcs-query
// ============================================================================

//! ## Overview
//! Identifiers render bracketed (`[p].[name]`), text literals as Unicode
//! literals (`N'...'`) with quotes doubled, and booleans as
//! `CAST(1 AS bit)` / `CAST(0 AS bit)`.

use std::fmt::Write;

use mcs_query::SortOrder;

/// SQL literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlLiteral {
    /// `NULL`
    Null,
    /// Bit literal.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Unicode text.
    Text(String),
}

/// SQL expression node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlExpr {
    /// Column of an aliased table.
    Column {
        /// Table alias.
        table: String,
        /// Column name.
        column: String,
    },
    /// Literal.
    Constant(SqlLiteral),
    /// Function call; user-defined functions carry a schema.
    Function {
        /// Owning schema, `None` for built-ins.
        schema: Option<String>,
        /// Function name.
        name: String,
        /// Arguments.
        args: Vec<SqlExpr>,
    },
    /// Binary operator.
    Binary {
        /// Operator token.
        op: &'static str,
        /// Left operand.
        left: Box<SqlExpr>,
        /// Right operand.
        right: Box<SqlExpr>,
    },
    /// `operand IS [NOT] NULL`.
    IsNull {
        /// Tested operand.
        operand: Box<SqlExpr>,
        /// True for `IS NOT NULL`.
        negated: bool,
    },
    /// `NOT (operand)`.
    Not(Box<SqlExpr>),
    /// `CASE WHEN test THEN a ELSE b END`.
    Case {
        /// Condition.
        test: Box<SqlExpr>,
        /// Value when the condition holds.
        if_true: Box<SqlExpr>,
        /// Value otherwise.
        if_false: Box<SqlExpr>,
    },
}

impl SqlExpr {
    /// Renders the expression to T-SQL.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    /// Appends the rendering of this expression.
    fn render_into(&self, out: &mut String) {
        match self {
            Self::Column {
                table,
                column,
            } => {
                push_ident(table, out);
                out.push('.');
                push_ident(column, out);
            }
            Self::Constant(literal) => render_literal(literal, out),
            Self::Function {
                schema,
                name,
                args,
            } => {
                if let Some(schema) = schema {
                    push_ident(schema, out);
                    out.push('.');
                    push_ident(name, out);
                } else {
                    out.push_str(&name.to_uppercase());
                }
                out.push('(');
                for (idx, arg) in args.iter().enumerate() {
                    if idx > 0 {
                        out.push_str(", ");
                    }
                    arg.render_into(out);
                }
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
                out.push_str(if *negated { " IS NOT NULL" } else { " IS NULL" });
            }
            Self::Not(inner) => {
                out.push_str("NOT (");
                inner.render_into(out);
                out.push(')');
            }
            Self::Case {
                test,
                if_true,
                if_false,
            } => {
                out.push_str("CASE WHEN ");
                test.render_into(out);
                out.push_str(" THEN ");
                if_true.render_into(out);
                out.push_str(" ELSE ");
                if_false.render_into(out);
                out.push_str(" END");
            }
        }
    }
}

/// Translated single-table select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlSelect {
    /// Projections; empty selects every column of the alias.
    pub projection: Vec<SqlExpr>,
    /// Table schema.
    pub schema: String,
    /// Table name.
    pub table: String,
    /// Table alias.
    pub alias: String,
    /// Filter predicate.
    pub predicate: Option<SqlExpr>,
    /// Sort keys.
    pub orderings: Vec<(SqlExpr, SortOrder)>,
}

impl SqlSelect {
    /// Renders the select statement.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::from("SELECT ");
        if self.projection.is_empty() {
            push_ident(&self.alias, &mut out);
            out.push_str(".*");
        } else {
            for (idx, expr) in self.projection.iter().enumerate() {
                if idx > 0 {
                    out.push_str(", ");
                }
                expr.render_into(&mut out);
            }
        }
        out.push_str(" FROM ");
        push_ident(&self.schema, &mut out);
        out.push('.');
        push_ident(&self.table, &mut out);
        out.push_str(" AS ");
        push_ident(&self.alias, &mut out);
        if let Some(predicate) = &self.predicate {
            out.push_str(" WHERE ");
            predicate.render_into(&mut out);
        }
        for (idx, (key, order)) in self.orderings.iter().enumerate() {
            out.push_str(if idx == 0 { " ORDER BY " } else { ", " });
            key.render_into(&mut out);
            if *order == SortOrder::Descending {
                out.push_str(" DESC");
            }
        }
        out
    }
}

/// Appends a bracketed identifier, doubling closing brackets.
fn push_ident(ident: &str, out: &mut String) {
    out.push('[');
    out.push_str(&ident.replace(']', "]]"));
    out.push(']');
}

/// Renders a literal.
fn render_literal(literal: &SqlLiteral, out: &mut String) {
    match literal {
        SqlLiteral::Null => out.push_str("NULL"),
        SqlLiteral::Bool(flag) => out.push_str(if *flag { "CAST(1 AS bit)" } else { "CAST(0 AS bit)" }),
        SqlLiteral::Int(value) => {
            let _ = write!(out, "{value}");
        }
        SqlLiteral::Text(text) => {
            out.push_str("N'");
            out.push_str(&text.replace('\'', "''"));
            out.push('\'');
        }
    }
}
