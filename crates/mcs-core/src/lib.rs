// crates/mcs-core/src/lib.rs
// ============================================================================
// Module: MCS Core Library
// Description: Localized-string values, culture identifiers, and fallback policies.
// Purpose: Provide the value-level building blocks shared by the translator and
//          both query backends.
// Dependencies: quick-xml, serde, thiserror
// ============================================================================

//! ## Overview
//! `mcs-core` holds everything about multicultural strings that is independent
//! of query translation:
//!
//! - [`CultureName`]: validated culture identifiers (`en`, `ru-RU`).
//! - [`MultiCulturalString`]: an insertion-ordered culture → text mapping.
//! - [`FallbackPolicy`]: the pluggable capability mapping a requested culture
//!   to its ordered preference chain, with the chain-table, parent-walk and
//!   no-fallback implementations.
//! - [`XmlFormatter`]: the on-disk XML storage format.
//! - [`native`]: reference semantics of the `mcs_get_string` storage primitive.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod chain;
pub mod culture;
pub mod native;
pub mod policy;
pub mod value;
pub mod xml;


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use chain::CHAIN_SEPARATOR;
pub use chain::decode_chain;
pub use chain::encode_chain;
pub use culture::CultureError;
pub use culture::CultureName;
pub use native::MCS_GET_STRING;
pub use native::MCS_GET_STRING_ARITY;
pub use native::mcs_get_string;
pub use policy::ChainPattern;
pub use policy::ChainTableError;
pub use policy::ChainsFallbackPolicy;
pub use policy::FallbackPolicy;
pub use policy::GlobalizationSettings;
pub use policy::NoFallbackPolicy;
pub use policy::ParentCultureFallbackPolicy;
pub use policy::PolicyError;
pub use policy::SharedPolicy;
pub use policy::UnmatchedChain;
pub use value::MultiCulturalString;
pub use xml::DEFAULT_NAMESPACE;
pub use xml::XmlEncoding;
pub use xml::XmlError;
pub use xml::XmlFormatter;
