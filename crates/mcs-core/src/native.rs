// crates/mcs-core/src/native.rs
// ============================================================================
// Module: Native Primitive Reference
// Description: Reference semantics of the `mcs_get_string` storage function.
// Purpose: Pin the contract of the three-argument primitive queries target.
// Dependencies: crate::{chain, value}
// ============================================================================

//! ## Overview
//! Translated queries call `mcs_get_string(stored, culture_name, chain)`
//! inside the persistence engine. This module states what that call returns
//! so host-side lookup and tests can check against it:
//!
//! 1. the text stored for `culture_name`, else
//! 2. the text of the first chain culture that is stored, else
//! 3. nothing.
//!
//! A `None` chain means "exact match only".

use crate::chain::decode_chain;
use crate::value::MultiCulturalString;

/// Name of the storage primitive.
pub const MCS_GET_STRING: &str = "mcs_get_string";

/// Fixed arity of the storage primitive.
pub const MCS_GET_STRING_ARITY: usize = 3;

/// Evaluates the storage primitive over an already deserialized value.
#[must_use]
pub fn mcs_get_string<'a>(
    stored: &'a MultiCulturalString,
    culture_name: &str,
    chain: Option<&str>,
) -> Option<&'a str> {
    if let Some(text) = stored.get_exact(culture_name) {
        return Some(text);
    }
    let chain = chain?;
    decode_chain(chain).into_iter().find_map(|culture| stored.get_exact(culture))
}
