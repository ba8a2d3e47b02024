//! Infrastructure layer for costwise
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod context;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileModelConfig, FileOrchestrationConfig,
    FileOutputConfig, FileRouteCategory, FileRoutingConfig,
};
pub use context::{ContextLoadError, JsonContextLoader};
pub use logging::JsonlExecutionLogger;
#[cfg(feature = "http-model")]
pub use providers::{OpenAiCompatibleClient, OpenAiCompatibleConfig, ProviderError};
