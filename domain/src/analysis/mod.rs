//! Analysis domain
//!
//! An [`Analysis`] is what a specialist produces: a summary, zero or more
//! recommendations and a bag of metrics. It can come from a model response
//! ([`parsing::parse_analysis`]) or from one of the deterministic
//! [`FallbackRule`]s, which are pure arithmetic over a [`CostSnapshot`].

pub mod cost_trend;
pub mod financial;
pub mod parsing;
pub mod remediation;
pub mod rightsizing;
pub mod snapshot;

pub use snapshot::{CostSnapshot, ResourceUsage, ServiceCost};

use crate::core::query::Query;
use crate::recommendation::entities::Recommendation;
use crate::specialist::identifier::SpecialistId;
use serde_json::{Map, Value};

/// Structured output of one specialist analysis
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Analysis {
    pub summary: String,
    pub recommendations: Vec<Recommendation>,
    pub metrics: Map<String, Value>,
}

impl Analysis {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            recommendations: Vec::new(),
            metrics: Map::new(),
        }
    }

    pub fn with_recommendation(mut self, recommendation: Recommendation) -> Self {
        self.recommendations.push(recommendation);
        self
    }

    pub fn with_recommendations(mut self, recommendations: Vec<Recommendation>) -> Self {
        self.recommendations.extend(recommendations);
        self
    }

    pub fn with_metric(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.metrics.insert(key.to_string(), value.into());
        self
    }

    /// Plain-text rendering used as the result content
    pub fn render(&self) -> String {
        if self.recommendations.is_empty() {
            return self.summary.clone();
        }

        let mut text = format!("{}\n\nRecommendations:", self.summary);
        for rec in &self.recommendations {
            text.push_str(&format!(
                "\n- {} (impact: {}, effort: {}, est. ${:.2}/month)",
                rec.title, rec.impact, rec.effort, rec.estimated_monthly_savings
            ));
        }
        text
    }
}

/// Deterministic, model-free analysis.
///
/// Implementations must not panic: they only do arithmetic over an already
/// normalized snapshot, guarding every division.
pub trait FallbackRule: Send + Sync {
    /// The specialist this rule analyzes for
    fn specialist(&self) -> SpecialistId;

    /// Produce an analysis for the query and its snapshot
    fn analyze(&self, query: &Query, snapshot: &CostSnapshot) -> Analysis;
}

/// The built-in fallback rule for a specialist, if it has one
pub fn standard_rule(specialist: &SpecialistId) -> Option<Box<dyn FallbackRule>> {
    match specialist {
        SpecialistId::Cost => Some(Box::new(cost_trend::CostTrendRule)),
        SpecialistId::Infrastructure => Some(Box::new(rightsizing::RightsizingRule)),
        SpecialistId::Financial => Some(Box::new(financial::RoiRule)),
        SpecialistId::Remediation => Some(Box::new(remediation::RemediationRule)),
        SpecialistId::Custom(_) => None,
    }
}

/// Arithmetic mean, 0 for an empty slice
pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Population standard deviation, 0 for fewer than two values
pub(crate) fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Round to cents for reporting
pub(crate) fn round2(value: f64) -> f64 {
    if value.is_finite() {
        (value * 100.0).round() / 100.0
    } else {
        0.0
    }
}
