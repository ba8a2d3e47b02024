//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod model;
mod orchestration;
mod output;
mod routing;

pub use model::FileModelConfig;
pub use orchestration::FileOrchestrationConfig;
pub use output::FileOutputConfig;
pub use routing::{FileRouteCategory, FileRoutingConfig};

use costwise_domain::ExecutionMode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    #[error("{0} cannot be 0")]
    InvalidTimeout(&'static str),

    #[error("model name cannot be empty")]
    EmptyModelName,

    #[error("unknown orchestration mode '{0}' (expected single, parallel, sequential or comprehensive)")]
    InvalidMode(String),

    #[error("routing category '{0}' has no keywords")]
    EmptyKeywords(String),

    #[error("temperature must be between 0 and 2, got {0}")]
    InvalidTemperature(f32),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Model backend settings
    pub model: FileModelConfig,
    /// Execution mode and timeouts
    pub orchestration: FileOrchestrationConfig,
    /// Keyword routing table
    pub routing: FileRoutingConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the configuration, stopping at the first problem
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.orchestration.per_unit_timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout(
                "orchestration.per_unit_timeout_seconds",
            ));
        }
        if self.model.request_timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout(
                "model.request_timeout_seconds",
            ));
        }

        if self
            .orchestration
            .default_mode
            .parse::<ExecutionMode>()
            .is_err()
        {
            return Err(ConfigValidationError::InvalidMode(
                self.orchestration.default_mode.clone(),
            ));
        }

        if self.model.enabled && self.model.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }
        if !(0.0..=2.0).contains(&self.model.temperature) {
            return Err(ConfigValidationError::InvalidTemperature(
                self.model.temperature,
            ));
        }

        for category in &self.routing.categories {
            if category.keywords.iter().all(|k| k.trim().is_empty()) {
                return Err(ConfigValidationError::EmptyKeywords(
                    category.specialist.clone(),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use costwise_domain::OutputFormat;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[model]
enabled = true
model = "gpt-4o-mini"
temperature = 0.0

[orchestration]
default_mode = "parallel"
per_unit_timeout_seconds = 30

[[routing.categories]]
specialist = "cost"
keywords = ["bill"]

[output]
format = "json"
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(config.model.enabled);
        assert_eq!(config.orchestration.parse_mode(), Some(ExecutionMode::Parallel));
        assert_eq!(config.orchestration.per_unit_timeout_seconds, 30);
        assert_eq!(config.routing.categories.len(), 1);
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert_eq!(config.output.color, Some(false));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[orchestration]
excerpt_chars = 200
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.orchestration.excerpt_chars, 200);
        // Defaults should apply
        assert_eq!(config.orchestration.default_mode, "comprehensive");
        assert!(!config.model.enabled);
        assert_eq!(config.output.color, None);
        assert!(config.output.progress);
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(FileConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let toml_str = r#"
[orchestration]
per_unit_timeout_seconds = 0
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidTimeout(_))
        ));
    }

    #[test]
    fn test_validate_unknown_mode() {
        let toml_str = r#"
[orchestration]
default_mode = "turbo"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidMode("turbo".to_string()))
        );
    }

    #[test]
    fn test_validate_empty_keywords() {
        let toml_str = r#"
[[routing.categories]]
specialist = "financial"
keywords = ["  "]
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::EmptyKeywords("financial".to_string()))
        );
    }

    #[test]
    fn test_validate_empty_model_name() {
        let toml_str = r#"
[model]
enabled = true
model = ""
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::EmptyModelName)
        ));
    }
}
