//! Application layer for costwise
//!
//! This crate contains use cases, specialist units, port definitions, and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod specialists;
pub mod use_cases;

// Re-export commonly used types
pub use config::OrchestratorConfig;
pub use ports::{
    execution_logger::{ExecutionEvent, ExecutionLogger, NoExecutionLogger},
    model_client::{ModelClient, ModelError},
    progress::{NoProgress, ProgressNotifier},
};
pub use specialists::{ModelBackedSpecialist, SpecialistRegistry, SpecialistUnit, UnitError};
pub use use_cases::aggregate::{AggregationInput, ResultAggregator};
pub use use_cases::execute_specialists::{ExecutionCoordinator, ExecutionOutcome};
pub use use_cases::orchestrate::{AnalysisRequest, CostOrchestrator, OrchestratorError};
