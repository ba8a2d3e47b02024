//! Aggregated response value object

use super::mode::ExecutionMode;
use crate::recommendation::entities::RankedRecommendation;
use crate::specialist::identifier::SpecialistId;
use crate::specialist::result::SpecialistResult;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Final output of one orchestrated analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedResponse {
    /// The query text that was analyzed
    pub query: String,
    pub mode: ExecutionMode,
    /// Specialists in execution order
    pub specialists: Vec<SpecialistId>,
    pub per_specialist_results: HashMap<SpecialistId, SpecialistResult>,
    pub ranked_recommendations: Vec<RankedRecommendation>,
    pub executive_summary: String,
    pub total_estimated_monthly_savings: f64,
    /// Number of results produced by the rule-based fallback path
    pub fallback_count: usize,
    pub total_execution_ms: u64,
    /// RFC 3339 timestamp
    pub generated_at: String,
}

impl AggregatedResponse {
    /// Result for a specialist, if it ran
    pub fn result(&self, id: &SpecialistId) -> Option<&SpecialistResult> {
        self.per_specialist_results.get(id)
    }

    /// Results in execution order
    pub fn ordered_results(&self) -> Vec<&SpecialistResult> {
        self.specialists
            .iter()
            .filter_map(|id| self.per_specialist_results.get(id))
            .collect()
    }

    pub fn success_count(&self) -> usize {
        self.per_specialist_results
            .values()
            .filter(|r| r.is_success())
            .count()
    }

    pub fn failure_count(&self) -> usize {
        self.per_specialist_results.len() - self.success_count()
    }

    /// The first `n` ranked recommendations
    pub fn top(&self, n: usize) -> &[RankedRecommendation] {
        &self.ranked_recommendations[..n.min(self.ranked_recommendations.len())]
    }
}
