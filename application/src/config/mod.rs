//! Application-level configuration.
//!
//! - [`OrchestratorConfig`]: execution mode defaults, timeouts and context threading

pub mod orchestrator_config;

pub use orchestrator_config::OrchestratorConfig;
