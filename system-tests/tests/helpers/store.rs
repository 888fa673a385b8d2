// system-tests/tests/helpers/store.rs
// ============================================================================
// Module: Stored Product Table
// Description: Rows holding the XML column text, queried through the primitive.
// Purpose: Execute translated accessor calls against stored values.
// Dependencies: mcs-core, mcs-hql, mcs-sql
// ============================================================================

//! ## Overview
//! Rows keep the exact column text the XML formatter produces. Executing a
//! translated call reads the culture and chain literals out of the emitted
//! `mcs_get_string` node and applies the reference primitive to every row.

use mcs_core::CultureName;
use mcs_core::FallbackPolicy;
use mcs_core::MCS_GET_STRING;
use mcs_core::XmlFormatter;
use mcs_core::mcs_get_string;
use mcs_hql::HqlLiteral;
use mcs_hql::HqlNode;
use mcs_sql::SqlExpr;
use mcs_sql::SqlLiteral;

use super::fixtures::Product;
use super::fixtures::TestResult;

/// Culture and chain literals frozen into an emitted call.
pub type FrozenArgs = (String, Option<String>);

/// Product table with names in their stored form.
#[derive(Debug)]
pub struct ProductTable {
    /// Formatter that wrote the rows.
    formatter: XmlFormatter,
    /// `(id, code, stored name)` rows.
    rows: Vec<(i64, String, Option<String>)>,
    /// Source rows for host-side checks.
    products: Vec<Product>,
}

impl ProductTable {
    /// Stores products through `formatter`.
    pub fn store(formatter: XmlFormatter, products: Vec<Product>) -> TestResult<Self> {
        let mut rows = Vec::new();
        for product in &products {
            let stored = formatter.to_stored(product.name.as_ref())?;
            rows.push((product.id, product.code.to_string(), stored));
        }
        Ok(Self {
            formatter,
            rows,
            products,
        })
    }

    /// Stored column text of every row.
    pub fn stored_names(&self) -> impl Iterator<Item = Option<&str>> {
        self.rows.iter().map(|(_, _, stored)| stored.as_deref())
    }

    /// Applies the primitive with frozen arguments to every row, in id order.
    pub fn execute(&self, (culture_name, chain): &FrozenArgs) -> TestResult<Vec<(i64, Option<String>)>> {
        let mut out = Vec::new();
        for (id, _, stored) in &self.rows {
            let value = self.formatter.from_stored(stored.as_deref())?;
            let text = value
                .as_ref()
                .and_then(|value| mcs_get_string(value, culture_name, chain.as_deref()))
                .map(str::to_string);
            out.push((*id, text));
        }
        Ok(out)
    }

    /// Host-side lookup over the unstored products, in id order.
    pub fn host_lookup(
        &self,
        culture: &CultureName,
        use_fallback: bool,
        policy: &dyn FallbackPolicy,
    ) -> TestResult<Vec<(i64, Option<String>)>> {
        let mut out = Vec::new();
        for product in &self.products {
            let text = match &product.name {
                Some(name) => name.get_string(culture, use_fallback, policy)?.map(str::to_string),
                None => None,
            };
            out.push((product.id, text));
        }
        Ok(out)
    }
}

/// Finds the first `mcs_get_string` call in a SQL tree and reads its literals.
pub fn frozen_sql(expr: &SqlExpr) -> Option<FrozenArgs> {
    match expr {
        SqlExpr::Function {
            name,
            args,
            ..
        } if name == MCS_GET_STRING => match args.as_slice() {
            [_, SqlExpr::Constant(SqlLiteral::Text(culture)), chain] => {
                let chain = match chain {
                    SqlExpr::Constant(SqlLiteral::Text(chain)) => Some(chain.clone()),
                    SqlExpr::Constant(SqlLiteral::Null) => None,
                    _ => return None,
                };
                Some((culture.clone(), chain))
            }
            _ => None,
        },
        SqlExpr::Function {
            args,
            ..
        } => args.iter().find_map(frozen_sql),
        SqlExpr::Binary {
            left,
            right,
            ..
        } => frozen_sql(left).or_else(|| frozen_sql(right)),
        SqlExpr::IsNull {
            operand,
            ..
        } => frozen_sql(operand),
        SqlExpr::Not(inner) => frozen_sql(inner),
        SqlExpr::Case {
            test,
            if_true,
            if_false,
        } => frozen_sql(test).or_else(|| frozen_sql(if_true)).or_else(|| frozen_sql(if_false)),
        SqlExpr::Column { .. } | SqlExpr::Constant(_) => None,
    }
}

/// Reads the literals of an HQL `mcs_get_string` call node.
pub fn frozen_hql(node: &HqlNode) -> Option<FrozenArgs> {
    let HqlNode::MethodCall {
        name,
        args,
    } = node
    else {
        return None;
    };
    if name != MCS_GET_STRING {
        return None;
    }
    match args.as_slice() {
        [_, HqlNode::Constant(HqlLiteral::Text(culture)), chain] => {
            let chain = match chain {
                HqlNode::Constant(HqlLiteral::Text(chain)) => Some(chain.clone()),
                HqlNode::Constant(HqlLiteral::Null) => None,
                _ => return None,
            };
            Some((culture.clone(), chain))
        }
        _ => None,
    }
}
