//! Orchestration configuration from TOML (`[orchestration]` section)

use costwise_application::OrchestratorConfig;
use costwise_domain::ExecutionMode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw orchestration configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOrchestrationConfig {
    /// "single", "parallel", "sequential" or "comprehensive"
    pub default_mode: String,
    pub per_unit_timeout_seconds: u64,
    /// Extra seconds before a unit counts as hung
    pub timeout_grace_seconds: u64,
    /// Characters of each result threaded into later specialists
    pub excerpt_chars: usize,
}

impl Default for FileOrchestrationConfig {
    fn default() -> Self {
        let defaults = OrchestratorConfig::default();
        Self {
            default_mode: defaults.default_mode.as_str().to_string(),
            per_unit_timeout_seconds: defaults.per_unit_timeout.as_secs(),
            timeout_grace_seconds: defaults.timeout_grace.as_secs(),
            excerpt_chars: defaults.excerpt_chars,
        }
    }
}

impl FileOrchestrationConfig {
    pub fn parse_mode(&self) -> Option<ExecutionMode> {
        self.default_mode.parse().ok()
    }

    /// Convert to the application config; an unparsable mode keeps the default
    pub fn to_orchestrator_config(&self) -> OrchestratorConfig {
        let defaults = OrchestratorConfig::default();
        OrchestratorConfig::default()
            .with_default_mode(self.parse_mode().unwrap_or(defaults.default_mode))
            .with_per_unit_timeout(Duration::from_secs(self.per_unit_timeout_seconds))
            .with_timeout_grace(Duration::from_secs(self.timeout_grace_seconds))
            .with_excerpt_chars(self.excerpt_chars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_round_trips_application_defaults() {
        let config = FileOrchestrationConfig::default();
        assert_eq!(config.default_mode, "comprehensive");
        assert_eq!(config.to_orchestrator_config(), OrchestratorConfig::default());
    }

    #[test]
    fn test_mode_aliases() {
        let config = FileOrchestrationConfig {
            default_mode: "par".to_string(),
            ..Default::default()
        };
        assert_eq!(config.parse_mode(), Some(ExecutionMode::Parallel));
        assert_eq!(
            config.to_orchestrator_config().default_mode,
            ExecutionMode::Parallel
        );
    }
}
