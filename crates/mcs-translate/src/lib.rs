// crates/mcs-translate/src/lib.rs
// ============================================================================
// Module: MCS Translate Library
// Description: Public API surface for accessor call translation.
// Purpose: Share one classify/resolve/build pipeline across query backends.
// Dependencies: crate::{adapter, canonical, catalog, context, error, param, resolve, shape,
//              trace}
// ============================================================================

//! ## Overview
//! Query backends hand localized-string accessor calls to this crate and get
//! back a call of the storage primitive `mcs_get_string(target, culture,
//! chain)`. The pipeline is:
//!
//! 1. [`classify`] the call's parameter signature into a [`Shape`];
//! 2. [`resolve`] culture, use-fallback flag and policy on the host side,
//!    producing a [`ResolvedTriple`];
//! 3. build a [`CanonicalCall`] the backend turns into its own node.
//!
//! Backends plug in through [`BackendAdapter`]; [`translate`] runs all three
//! steps. Ambient culture and default policy arrive through an explicit
//! [`TranslationContext`]; nothing is read from process globals.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod adapter;
pub mod canonical;
pub mod catalog;
pub mod context;
pub mod error;
pub mod param;
pub mod resolve;
pub mod shape;
pub mod trace;


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use adapter::AccessorCall;
pub use adapter::BackendAdapter;
pub use adapter::translate;
pub use canonical::CanonicalArg;
pub use canonical::CanonicalCall;
pub use catalog::AccessorCatalog;
pub use catalog::AccessorName;
pub use catalog::MethodIdentity;
pub use context::TranslationContext;
pub use error::EvalError;
pub use error::TranslateError;
pub use param::CallForm;
pub use param::HostValue;
pub use param::ParamType;
pub use resolve::ResolvedTriple;
pub use resolve::resolve;
pub use shape::CultureSource;
pub use shape::FlagSource;
pub use shape::PolicySource;
pub use shape::Shape;
pub use shape::classify;
pub use trace::NoopTrace;
pub use trace::TranslationTrace;
