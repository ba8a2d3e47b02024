//! Recommendation value objects

use super::levels::{EffortLevel, ImpactLevel, PriorityLevel};
use super::scoring::priority_score;
use crate::specialist::identifier::SpecialistId;
use serde::{Deserialize, Serialize};

/// A single actionable finding surfaced by a specialist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub category: String,
    pub impact: ImpactLevel,
    pub effort: EffortLevel,
    /// Estimated savings per month, in the account's billing currency
    #[serde(default)]
    pub estimated_monthly_savings: f64,
    /// The specialist that emitted this recommendation
    pub source: SpecialistId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Recommendation {
    pub fn new(
        source: SpecialistId,
        title: impl Into<String>,
        category: impl Into<String>,
        impact: ImpactLevel,
        effort: EffortLevel,
    ) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            impact,
            effort,
            estimated_monthly_savings: 0.0,
            source,
            description: None,
        }
    }

    /// Set the monthly savings estimate. Negative or non-finite values become 0.
    pub fn with_savings(mut self, monthly: f64) -> Self {
        self.estimated_monthly_savings = if monthly.is_finite() && monthly > 0.0 {
            (monthly * 100.0).round() / 100.0
        } else {
            0.0
        };
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Derived priority score
    pub fn priority_score(&self) -> u8 {
        priority_score(self.impact, self.effort)
    }
}

/// A recommendation with its computed rank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRecommendation {
    #[serde(flatten)]
    pub recommendation: Recommendation,
    pub priority_score: u8,
    /// 1-based position in the ranked list
    pub priority_rank: usize,
    pub priority_level: PriorityLevel,
}

impl RankedRecommendation {
    pub fn title(&self) -> &str {
        &self.recommendation.title
    }

    pub fn source(&self) -> &SpecialistId {
        &self.recommendation.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_score_is_derived() {
        let rec = Recommendation::new(
            SpecialistId::Cost,
            "X",
            "cost_trend",
            ImpactLevel::High,
            EffortLevel::Low,
        );
        assert_eq!(rec.priority_score(), 12);
    }

    #[test]
    fn test_with_savings_sanitizes() {
        let base = Recommendation::new(
            SpecialistId::Cost,
            "X",
            "c",
            ImpactLevel::Low,
            EffortLevel::Low,
        );
        assert_eq!(base.clone().with_savings(-5.0).estimated_monthly_savings, 0.0);
        assert_eq!(base.clone().with_savings(f64::NAN).estimated_monthly_savings, 0.0);
        assert_eq!(base.with_savings(12.345).estimated_monthly_savings, 12.35);
    }
}
