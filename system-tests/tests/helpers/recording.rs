// system-tests/tests/helpers/recording.rs
// ============================================================================
// Module: Recording Trace
// Description: Trace hook capturing every translation event.
// Purpose: Compare what each backend resolved for the same call site.
// Dependencies: mcs-translate
// ============================================================================

use mcs_translate::AccessorName;
use mcs_translate::Shape;
use mcs_translate::TranslateError;
use mcs_translate::TranslationTrace;

/// Trace event captured by [`RecordingTrace`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    /// Call entered the pipeline.
    Call(AccessorName, Shape),
    /// Call resolved to culture name and chain.
    Resolved(Shape, String, Option<String>),
    /// Call rejected.
    Rejected(Shape, TranslateError),
}

/// Trace hook that records every event.
#[derive(Debug, Default)]
pub struct RecordingTrace {
    /// Events in firing order.
    pub events: Vec<TraceEvent>,
}

impl TranslationTrace for RecordingTrace {
    fn on_call(&mut self, accessor: AccessorName, shape: Shape) {
        self.events.push(TraceEvent::Call(accessor, shape));
    }

    fn on_resolved(&mut self, shape: Shape, culture_name: &str, fallback_chain: Option<&str>) {
        self.events.push(TraceEvent::Resolved(
            shape,
            culture_name.to_string(),
            fallback_chain.map(str::to_string),
        ));
    }

    fn on_rejected(&mut self, shape: Shape, error: &TranslateError) {
        self.events.push(TraceEvent::Rejected(shape, error.clone()));
    }
}
