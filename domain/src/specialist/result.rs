//! Specialist result value object

use super::identifier::SpecialistId;
use crate::analysis::Analysis;
use crate::core::error::DomainError;
use crate::core::string::excerpt;
use crate::recommendation::entities::Recommendation;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Output of a single specialist invocation
///
/// Either `success` is true or `error` is set, never both. The constructors
/// always produce such a result and deserialization rejects records that
/// break the rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ResultRecord")]
pub struct SpecialistResult {
    pub specialist: SpecialistId,
    pub success: bool,
    /// Human-readable analysis text
    pub content: String,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metrics: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub duration_ms: u64,
    /// Whether the deterministic rule-based path produced this result
    pub used_fallback: bool,
}

/// Wire shape of [`SpecialistResult`], checked on the way in
#[derive(Deserialize)]
struct ResultRecord {
    specialist: SpecialistId,
    success: bool,
    content: String,
    #[serde(default)]
    recommendations: Vec<Recommendation>,
    #[serde(default)]
    metrics: Map<String, Value>,
    #[serde(default)]
    error: Option<String>,
    duration_ms: u64,
    used_fallback: bool,
}

impl TryFrom<ResultRecord> for SpecialistResult {
    type Error = DomainError;

    fn try_from(record: ResultRecord) -> Result<Self, Self::Error> {
        match (record.success, record.error.is_some()) {
            (true, true) => {
                return Err(DomainError::InvalidResult(format!(
                    "'{}' is marked successful but carries an error",
                    record.specialist
                )));
            }
            (false, false) => {
                return Err(DomainError::InvalidResult(format!(
                    "'{}' failed without an error",
                    record.specialist
                )));
            }
            _ => {}
        }

        Ok(Self {
            specialist: record.specialist,
            success: record.success,
            content: record.content,
            recommendations: record.recommendations,
            metrics: record.metrics,
            error: record.error,
            duration_ms: record.duration_ms,
            used_fallback: record.used_fallback,
        })
    }
}

impl SpecialistResult {
    /// A result produced by the model-backed analysis
    pub fn from_model(specialist: SpecialistId, analysis: Analysis, duration_ms: u64) -> Self {
        Self::from_analysis(specialist, analysis, duration_ms, false)
    }

    /// A result produced by the deterministic fallback rules
    pub fn from_fallback(specialist: SpecialistId, analysis: Analysis, duration_ms: u64) -> Self {
        Self::from_analysis(specialist, analysis, duration_ms, true)
    }

    fn from_analysis(
        specialist: SpecialistId,
        analysis: Analysis,
        duration_ms: u64,
        used_fallback: bool,
    ) -> Self {
        Self {
            specialist,
            success: true,
            content: analysis.render(),
            recommendations: analysis.recommendations,
            metrics: analysis.metrics,
            error: None,
            duration_ms,
            used_fallback,
        }
    }

    /// A failed result carrying the cause
    pub fn failure(specialist: SpecialistId, error: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            specialist,
            success: false,
            content: String::new(),
            recommendations: Vec::new(),
            metrics: Map::new(),
            error: Some(error.into()),
            duration_ms,
            used_fallback: false,
        }
    }

    /// Returns `true` if this result was produced successfully.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Bounded excerpt of the content, used for context threading
    pub fn excerpt(&self, max_chars: usize) -> String {
        excerpt(&self.content, max_chars)
    }
}
