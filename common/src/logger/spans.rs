use std::time::{Duration, Instant};

use tracing::{Span, field};

use super::TraceId;

/// Root span for one simulation session. `tick` is filled in by callers that
/// log per-tick work underneath it.
pub fn root_span(name: &'static str, trace_id: &TraceId) -> Span {
    tracing::info_span!(
        "root",
        name = %name,
        trace_id = %trace_id.as_str(),
        tick = field::Empty
    )
}

/// Create a child span (inherits trace_id from the current root).
pub fn child_span(name: &'static str) -> Span {
    tracing::info_span!("child", name = %name, tick = field::Empty)
}

/// Runs `f` and emits a `performance` warning when it takes longer than `max`.
pub fn warn_if_slow<T>(label: &'static str, max: Duration, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let out = f();
    let elapsed = start.elapsed();
    if elapsed > max {
        tracing::warn!(
            target: "performance",
            label = label,
            elapsed_ms = elapsed.as_millis() as u64,
            "slow operation detected"
        );
    }
    out
}
