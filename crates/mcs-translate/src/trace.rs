// crates/mcs-translate/src/trace.rs
// ============================================================================
// Module: Translation Trace Hooks
// Description: Observer hooks fired while a call site is translated.
// Purpose: Let callers record resolutions without coupling to a logger.
// Dependencies: crate::{catalog, error, shape}
// ============================================================================

//! ## Overview
//! Hooks fire once per call site: [`TranslationTrace::on_call`] before
//! resolution, then exactly one of `on_resolved` or `on_rejected`.

use crate::catalog::AccessorName;
use crate::error::TranslateError;
use crate::shape::Shape;

/// Trace hook for accessor translation.
pub trait TranslationTrace {
    /// Called when a recognized accessor call enters the pipeline.
    fn on_call(&mut self, accessor: AccessorName, shape: Shape);

    /// Called with the literals frozen into the query.
    fn on_resolved(&mut self, shape: Shape, culture_name: &str, fallback_chain: Option<&str>);

    /// Called when translation of the call site fails.
    fn on_rejected(&mut self, shape: Shape, error: &TranslateError);
}

/// No-op trace hook for fast paths.
///
/// # Invariants
/// - Zero-sized marker type; carries no state.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTrace;

impl TranslationTrace for NoopTrace {
    fn on_call(&mut self, _accessor: AccessorName, _shape: Shape) {}

    fn on_resolved(&mut self, _shape: Shape, _culture_name: &str, _fallback_chain: Option<&str>) {}

    fn on_rejected(&mut self, _shape: Shape, _error: &TranslateError) {}
}
