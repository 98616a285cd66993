use tracing::{Span, field};

use super::TraceId;

/// Root span for one user action (analysis request, blog fetch, ...).
pub fn root_span(name: &'static str, trace_id: &TraceId) -> Span {
    tracing::info_span!(
        "root",
        name = %name,
        trace_id = %trace_id,
        generation = field::Empty
    )
}

/// Child span; the trace id is inherited from the enclosing root span.
pub fn child_span(name: &'static str) -> Span {
    tracing::info_span!("child", name = %name, generation = field::Empty)
}

/// Records which snapshot generation the current span is working against.
pub fn annotate_generation(generation: u64) {
    Span::current().record("generation", generation);
}
