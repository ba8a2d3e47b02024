//! Orchestrator parameters: execution loop control.
//!
//! [`OrchestratorConfig`] groups the static parameters that control how the
//! [`CostOrchestrator`](crate::use_cases::orchestrate::CostOrchestrator) runs
//! specialists. These are application-layer concerns, not domain policy.

use costwise_domain::ExecutionMode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Execution control parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Mode used when a request does not name one.
    pub default_mode: ExecutionMode,
    /// Deadline for one model call. Exceeding it sends the unit to its fallback.
    pub per_unit_timeout: Duration,
    /// Extra time the coordinator waits on top of `per_unit_timeout` before
    /// treating a unit as hung.
    pub timeout_grace: Duration,
    /// Maximum characters of a result threaded into the next unit's context.
    pub excerpt_chars: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            default_mode: ExecutionMode::Comprehensive,
            per_unit_timeout: Duration::from_secs(60),
            timeout_grace: Duration::from_secs(5),
            excerpt_chars: 500,
        }
    }
}

impl OrchestratorConfig {
    // ==================== Builder Methods ====================

    pub fn with_default_mode(mut self, mode: ExecutionMode) -> Self {
        self.default_mode = mode;
        self
    }

    pub fn with_per_unit_timeout(mut self, timeout: Duration) -> Self {
        self.per_unit_timeout = timeout;
        self
    }

    pub fn with_timeout_grace(mut self, grace: Duration) -> Self {
        self.timeout_grace = grace;
        self
    }

    pub fn with_excerpt_chars(mut self, chars: usize) -> Self {
        self.excerpt_chars = chars;
        self
    }

    /// Outer deadline the coordinator puts around a whole unit invocation
    pub fn unit_deadline(&self) -> Duration {
        self.per_unit_timeout + self.timeout_grace
    }
}
