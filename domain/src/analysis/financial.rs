//! Financial ROI fallback rule

use super::{Analysis, CostSnapshot, FallbackRule, round2};
use crate::core::query::Query;
use crate::recommendation::entities::Recommendation;
use crate::recommendation::levels::{EffortLevel, ImpactLevel};
use crate::specialist::identifier::SpecialistId;

/// Share of monthly run-rate assumed recoverable by a standard optimization program
const POTENTIAL_SAVINGS_RATIO: f64 = 0.15;
/// Implementation cost assumed when none is supplied, in months of savings
const DEFAULT_IMPLEMENTATION_MONTHS: f64 = 2.0;
const COMMITMENT_RATIO: f64 = 0.10;
const BUDGET_GUARDRAIL_RATIO: f64 = 0.05;
/// Run-rate above which commitment discounts are high impact
const LARGE_ACCOUNT_RUN_RATE: f64 = 10_000.0;

/// Return-on-investment figures for an optimization program
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoiEstimate {
    pub monthly_savings: f64,
    pub annual_savings: f64,
    pub implementation_cost: f64,
    /// `(annual_savings - implementation_cost) / implementation_cost * 100`
    pub roi_percent: f64,
    /// Months until savings cover the implementation cost
    pub payback_months: Option<f64>,
}

/// Estimate ROI from a monthly run-rate
pub fn estimate_roi(run_rate: f64, implementation_cost: Option<f64>) -> RoiEstimate {
    let monthly_savings = run_rate.max(0.0) * POTENTIAL_SAVINGS_RATIO;
    let annual_savings = monthly_savings * 12.0;
    let implementation_cost =
        implementation_cost.unwrap_or(monthly_savings * DEFAULT_IMPLEMENTATION_MONTHS);

    let roi_percent = if implementation_cost > 0.0 {
        (annual_savings - implementation_cost) / implementation_cost * 100.0
    } else {
        0.0
    };
    let payback_months = if monthly_savings > 0.0 {
        Some(implementation_cost / monthly_savings)
    } else {
        None
    };

    RoiEstimate {
        monthly_savings,
        annual_savings,
        implementation_cost,
        roi_percent,
        payback_months,
    }
}

/// ROI and payback analysis for the financial specialist
pub struct RoiRule;

impl FallbackRule for RoiRule {
    fn specialist(&self) -> SpecialistId {
        SpecialistId::Financial
    }

    fn analyze(&self, query: &Query, snapshot: &CostSnapshot) -> Analysis {
        let id = self.specialist();
        let run_rate = snapshot.monthly_run_rate();

        if run_rate <= 0.0 {
            return Analysis::new(
                "No spend data available; ROI cannot be estimated until a baseline exists.",
            )
            .with_recommendation(Recommendation::new(
                id,
                "Capture a spend baseline before committing to optimization investments",
                "financial_planning",
                ImpactLevel::Low,
                EffortLevel::Low,
            ));
        }

        let roi = estimate_roi(run_rate, snapshot.implementation_cost);
        let commitment_impact = if run_rate >= LARGE_ACCOUNT_RUN_RATE {
            ImpactLevel::High
        } else {
            ImpactLevel::Medium
        };

        let recommendations = vec![
            Recommendation::new(
                id.clone(),
                "Purchase commitment discounts for steady-state usage",
                "commitments",
                commitment_impact,
                EffortLevel::Medium,
            )
            .with_savings(run_rate * COMMITMENT_RATIO),
            Recommendation::new(
                id,
                "Introduce monthly budget guardrails and alerts",
                "financial_governance",
                ImpactLevel::Medium,
                EffortLevel::Low,
            )
            .with_savings(run_rate * BUDGET_GUARDRAIL_RATIO),
        ];

        let prior = query.prior_findings().len();
        let payback = roi
            .payback_months
            .map(|m| format!("{:.1} months", m))
            .unwrap_or_else(|| "n/a".to_string());
        let mut summary = format!(
            "Estimated savings ${:.2}/month (${:.2}/year) against ${:.2} implementation cost: ROI {:.0}%, payback {}.",
            roi.monthly_savings, roi.annual_savings, roi.implementation_cost, roi.roi_percent, payback
        );
        if prior > 0 {
            summary.push_str(&format!(" Builds on {} earlier finding(s).", prior));
        }

        let mut analysis = Analysis::new(summary)
            .with_recommendations(recommendations)
            .with_metric("monthly_run_rate", round2(run_rate))
            .with_metric("potential_monthly_savings", round2(roi.monthly_savings))
            .with_metric("annual_savings", round2(roi.annual_savings))
            .with_metric("implementation_cost", round2(roi.implementation_cost))
            .with_metric("roi_percent", round2(roi.roi_percent));
        if let Some(months) = roi.payback_months {
            analysis = analysis.with_metric("payback_months", round2(months));
        }
        analysis
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::query::PriorFinding;
    use serde_json::json;

    #[test]
    fn test_estimate_roi_default_implementation_cost() {
        let roi = estimate_roi(10_000.0, None);
        assert_eq!(roi.monthly_savings, 1500.0);
        assert_eq!(roi.annual_savings, 18_000.0);
        assert_eq!(roi.implementation_cost, 3000.0);
        assert_eq!(roi.roi_percent, 500.0);
        assert_eq!(roi.payback_months, Some(2.0));
    }

    #[test]
    fn test_estimate_roi_zero_run_rate() {
        let roi = estimate_roi(0.0, None);
        assert_eq!(roi.roi_percent, 0.0);
        assert_eq!(roi.payback_months, None);
    }

    #[test]
    fn test_rule_with_spend() {
        let snapshot = CostSnapshot::from_context(
            json!({"total_cost": 20_000.0, "implementation_cost": 6000.0})
                .as_object()
                .unwrap(),
        );
        let query = Query::new("what is the ROI")
            .with_prior_finding(PriorFinding::new(SpecialistId::Cost, "spend rising"));

        let analysis = RoiRule.analyze(&query, &snapshot);
        assert_eq!(analysis.recommendations.len(), 2);
        assert_eq!(analysis.recommendations[0].impact, ImpactLevel::High);
        assert_eq!(analysis.recommendations[0].estimated_monthly_savings, 2000.0);
        assert_eq!(analysis.metrics["roi_percent"], 500.0);
        assert!(analysis.summary.contains("1 earlier finding"));
    }

    #[test]
    fn test_rule_without_spend() {
        let analysis = RoiRule.analyze(&Query::new("roi"), &CostSnapshot::default());
        assert_eq!(analysis.recommendations.len(), 1);
        assert_eq!(analysis.recommendations[0].impact, ImpactLevel::Low);
    }
}
