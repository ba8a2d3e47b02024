//! Model client port
//!
//! Defines the interface for asking a language model for an analysis.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when calling the model
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Model unavailable: {0}")]
    Unavailable(String),

    #[error("Timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Malformed output: {0}")]
    MalformedOutput(String),

    #[error("No model client configured")]
    NotConfigured,
}

impl ModelError {
    /// Whether the backend could not be reached at all
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            ModelError::Unavailable(_) | ModelError::Timeout | ModelError::NotConfigured
        )
    }
}

/// Text generation capability
///
/// This port defines how specialists talk to a language model.
/// Implementations (adapters) live in the infrastructure layer. A single
/// client is shared read-only by every specialist.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Generate a completion for `prompt` under `system_prompt`
    async fn generate(
        &self,
        prompt: &str,
        system_prompt: &str,
        temperature: f32,
    ) -> Result<String, ModelError>;

    /// Name used in logs (e.g. the model identifier)
    fn name(&self) -> &str;
}
