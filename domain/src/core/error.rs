//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid execution mode: {0}")]
    InvalidMode(String),

    #[error("Invalid impact level: {0}")]
    InvalidImpact(String),

    #[error("Invalid effort level: {0}")]
    InvalidEffort(String),

    #[error("Invalid routing table: {0}")]
    InvalidRoutingTable(String),

    #[error("Malformed model output: {0}")]
    MalformedModelOutput(String),

    #[error("Invalid specialist result: {0}")]
    InvalidResult(String),
}

impl DomainError {
    /// Check if this error came from parsing a model response
    pub fn is_malformed_output(&self) -> bool {
        matches!(self, DomainError::MalformedModelOutput(_))
    }
}
