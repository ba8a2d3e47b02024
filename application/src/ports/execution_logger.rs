//! Port for structured execution logging.
//!
//! Defines the [`ExecutionLogger`] trait for recording what an analysis run
//! did (routing, per-specialist outcomes, totals) to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures a
//! machine-readable audit trail (JSONL).

use serde_json::Value;

/// A structured execution event for logging.
pub struct ExecutionEvent {
    /// Event type identifier (e.g., "execution_started", "specialist_completed").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ExecutionEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging execution events.
///
/// `log` is synchronous and infallible: a broken log must not abort an
/// analysis, so implementations swallow their own write errors.
pub trait ExecutionLogger: Send + Sync {
    /// Record an execution event.
    fn log(&self, event: ExecutionEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoExecutionLogger;

impl ExecutionLogger for NoExecutionLogger {
    fn log(&self, _event: ExecutionEvent) {}
}
