// crates/mcs-core/src/chain.rs
// ============================================================================
// Module: Fallback Chain Encoding
// Description: Comma-joined wire form of an ordered culture preference chain.
// Purpose: Keep the host-side encoder and the reference decoder in one place.
// Dependencies: crate::culture
// ============================================================================

//! ## Overview
//! A fallback chain travels inside the outgoing query as a single string
//! literal: culture identifiers joined by [`CHAIN_SEPARATOR`], most preferred
//! first, with no leading or trailing separator. An empty chain encodes to the
//! empty string, which is distinct from "no fallback requested" (`None`).

use crate::culture::CultureName;

/// Separator between culture identifiers in an encoded chain.
pub const CHAIN_SEPARATOR: char = ',';

/// Encodes an ordered chain into its wire form.
#[must_use]
pub fn encode_chain(chain: &[CultureName]) -> String {
    let mut encoded = String::new();
    for (idx, culture) in chain.iter().enumerate() {
        if idx > 0 {
            encoded.push(CHAIN_SEPARATOR);
        }
        encoded.push_str(culture.as_str());
    }
    encoded
}

/// Splits an encoded chain back into identifiers, preserving order.
///
/// The empty string decodes to an empty chain.
#[must_use]
pub fn decode_chain(encoded: &str) -> Vec<&str> {
    if encoded.is_empty() {
        return Vec::new();
    }
    encoded.split(CHAIN_SEPARATOR).collect()
}
