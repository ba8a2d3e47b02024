//! Execution mode definitions.
//!
//! Defines [`ExecutionMode`], which determines how the selected specialists run:
//! - Single: one specialist, direct call
//! - Parallel: all specialists concurrently, wait for all
//! - Sequential: one after another, no context sharing
//! - Comprehensive: one after another, each sees earlier findings

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the selected specialists are executed.
///
/// # Comprehensive (default)
///
/// Specialists run in routed order and each one's result text is threaded
/// (as a bounded excerpt) into the context of the next, so the remediation
/// planner can build on cost and infrastructure findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Exactly one specialist, no concurrency machinery
    Single,
    /// Fan out to all specialists concurrently, fan in when all finish
    Parallel,
    /// Strictly ordered, without context threading
    Sequential,
    /// Strictly ordered, with context threading
    #[default]
    Comprehensive,
}

impl ExecutionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionMode::Single => "single",
            ExecutionMode::Parallel => "parallel",
            ExecutionMode::Sequential => "sequential",
            ExecutionMode::Comprehensive => "comprehensive",
        }
    }

    /// Get a human-readable description of this mode
    pub fn description(&self) -> &'static str {
        match self {
            ExecutionMode::Single => "Single: one specialist, direct call",
            ExecutionMode::Parallel => "Parallel: all specialists concurrently",
            ExecutionMode::Sequential => "Sequential: specialists one after another",
            ExecutionMode::Comprehensive => {
                "Comprehensive: sequential, each specialist sees earlier findings"
            }
        }
    }

    /// Check if specialists run concurrently in this mode
    pub fn is_concurrent(&self) -> bool {
        matches!(self, ExecutionMode::Parallel)
    }

    /// Check if earlier results are threaded into later specialists' context
    pub fn threads_context(&self) -> bool {
        matches!(self, ExecutionMode::Comprehensive)
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ExecutionMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "single" | "solo" => Ok(ExecutionMode::Single),
            "parallel" | "par" | "p" => Ok(ExecutionMode::Parallel),
            "sequential" | "seq" | "s" => Ok(ExecutionMode::Sequential),
            "comprehensive" | "full" | "c" => Ok(ExecutionMode::Comprehensive),
            _ => Err(DomainError::InvalidMode(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_comprehensive() {
        assert_eq!(ExecutionMode::default(), ExecutionMode::Comprehensive);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("parallel".parse::<ExecutionMode>().ok(), Some(ExecutionMode::Parallel));
        assert_eq!("SEQ".parse::<ExecutionMode>().ok(), Some(ExecutionMode::Sequential));
        assert_eq!("single".parse::<ExecutionMode>().ok(), Some(ExecutionMode::Single));
        assert_eq!(
            "comprehensive".parse::<ExecutionMode>().ok(),
            Some(ExecutionMode::Comprehensive)
        );
        assert!("dag".parse::<ExecutionMode>().is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        for mode in [
            ExecutionMode::Single,
            ExecutionMode::Parallel,
            ExecutionMode::Sequential,
            ExecutionMode::Comprehensive,
        ] {
            assert_eq!(mode.to_string().parse::<ExecutionMode>().ok(), Some(mode));
        }
    }

    #[test]
    fn test_serde_lowercase() {
        let mode: ExecutionMode = serde_json::from_str("\"parallel\"").unwrap();
        assert_eq!(mode, ExecutionMode::Parallel);
    }

    #[test]
    fn test_flags() {
        assert!(ExecutionMode::Parallel.is_concurrent());
        assert!(!ExecutionMode::Sequential.is_concurrent());
        assert!(ExecutionMode::Comprehensive.threads_context());
        assert!(!ExecutionMode::Sequential.threads_context());
    }
}
