//! Remediation planning fallback rule
//!
//! Builds a three-phase plan (quick wins, optimization, governance) from the
//! snapshot and whatever earlier specialists found.

use super::rightsizing::{Sizing, classify};
use super::{Analysis, CostSnapshot, FallbackRule, round2};
use crate::core::query::Query;
use crate::recommendation::entities::Recommendation;
use crate::recommendation::levels::{EffortLevel, ImpactLevel};
use crate::specialist::identifier::SpecialistId;

const IDLE_CLEANUP_RATIO: f64 = 0.9;
const AUTOMATION_RATIO: f64 = 0.05;

/// Phased remediation plan for the remediation specialist
pub struct RemediationRule;

impl FallbackRule for RemediationRule {
    fn specialist(&self) -> SpecialistId {
        SpecialistId::Remediation
    }

    fn analyze(&self, query: &Query, snapshot: &CostSnapshot) -> Analysis {
        let id = self.specialist();
        let run_rate = snapshot.monthly_run_rate();
        let prior = query.prior_findings();

        let idle_cost: f64 = snapshot
            .resources
            .iter()
            .filter(|r| classify(r) == Sizing::Idle)
            .map(|r| r.monthly_cost)
            .sum();
        let cleanup_impact = if idle_cost > 0.0 {
            ImpactLevel::High
        } else {
            ImpactLevel::Medium
        };

        let recommendations = vec![
            Recommendation::new(
                id.clone(),
                "Phase 1: clean up idle and unattached resources",
                "idle_resources",
                cleanup_impact,
                EffortLevel::Low,
            )
            .with_savings(idle_cost * IDLE_CLEANUP_RATIO),
            Recommendation::new(
                id.clone(),
                "Phase 2: automate scheduled rightsizing reviews",
                "automation",
                ImpactLevel::Medium,
                EffortLevel::Medium,
            )
            .with_savings(run_rate * AUTOMATION_RATIO),
            Recommendation::new(
                id,
                "Phase 3: enforce tagging and cost ownership policies",
                "governance",
                ImpactLevel::Low,
                EffortLevel::Medium,
            ),
        ];

        let mut summary = String::from(
            "Remediation plan in 3 phases: quick wins, optimization automation, governance.",
        );
        if prior.is_empty() {
            summary.push_str(" No earlier findings were available.");
        } else {
            let sources: Vec<&str> = prior.iter().map(|f| f.specialist.as_str()).collect();
            summary.push_str(&format!(
                " Incorporates findings from: {}.",
                sources.join(", ")
            ));
        }

        Analysis::new(summary)
            .with_recommendations(recommendations)
            .with_metric("phases", 3)
            .with_metric("prior_findings", prior.len())
            .with_metric("idle_monthly_cost", round2(idle_cost))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::query::PriorFinding;
    use serde_json::json;

    #[test]
    fn test_plan_has_three_phases() {
        let analysis = RemediationRule.analyze(&Query::new("fix it"), &CostSnapshot::default());
        assert_eq!(analysis.recommendations.len(), 3);
        assert!(analysis.summary.contains("No earlier findings"));
        assert_eq!(analysis.recommendations[0].impact, ImpactLevel::Medium);
    }

    #[test]
    fn test_idle_resources_raise_quick_win_impact() {
        let snapshot = CostSnapshot::from_context(
            json!({"resources": [{"id": "vm-9", "cpu_utilization": 1, "monthly_cost": 400}]})
                .as_object()
                .unwrap(),
        );
        let analysis = RemediationRule.analyze(&Query::new("plan"), &snapshot);

        let quick_win = &analysis.recommendations[0];
        assert_eq!(quick_win.impact, ImpactLevel::High);
        assert_eq!(quick_win.estimated_monthly_savings, 360.0);
        // Same bucket as the infrastructure rule's idle cleanup
        assert_eq!(quick_win.category, "idle_resources");
    }

    #[test]
    fn test_mentions_prior_findings() {
        let query = Query::new("plan")
            .with_prior_finding(PriorFinding::new(SpecialistId::Cost, "a"))
            .with_prior_finding(PriorFinding::new(SpecialistId::Infrastructure, "b"));
        let analysis = RemediationRule.analyze(&query, &CostSnapshot::default());

        assert!(analysis.summary.contains("cost, infrastructure"));
        assert_eq!(analysis.metrics["prior_findings"], 2);
    }
}
