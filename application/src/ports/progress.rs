//! Progress notification port
//!
//! Defines the interface for reporting progress while specialists run.

use costwise_domain::{ExecutionMode, SpecialistId, SpecialistResult};

/// Callback for progress updates during an orchestrated analysis
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, web UI, etc.). In parallel mode the
/// per-specialist callbacks arrive in completion order.
pub trait ProgressNotifier: Send + Sync {
    /// Called once routing is done, before any specialist runs
    fn on_execution_start(&self, mode: ExecutionMode, specialists: &[SpecialistId]);

    /// Called when a specialist starts
    fn on_specialist_start(&self, specialist: &SpecialistId);

    /// Called when a specialist produced its result
    fn on_specialist_complete(&self, result: &SpecialistResult);

    /// Called after aggregation
    fn on_execution_complete(&self, _total_ms: u64) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_execution_start(&self, _mode: ExecutionMode, _specialists: &[SpecialistId]) {}
    fn on_specialist_start(&self, _specialist: &SpecialistId) {}
    fn on_specialist_complete(&self, _result: &SpecialistResult) {}
}
