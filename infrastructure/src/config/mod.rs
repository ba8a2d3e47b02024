//! Configuration file loading for costwise
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `COSTWISE_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./costwise.toml` or `./.costwise.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/costwise/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileModelConfig, FileOrchestrationConfig, FileOutputConfig,
    FileRouteCategory, FileRoutingConfig,
};
pub use loader::ConfigLoader;
