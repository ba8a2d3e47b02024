//! Aggregate Results use case
//!
//! Folds per-specialist results into one [`AggregatedResponse`]: a single
//! ranked recommendation list and a deterministic executive summary.
//! Aggregation never fails; partial or empty result maps are fine.

use costwise_domain::{
    AggregatedResponse, ExecutionMode, RankedRecommendation, Recommendation, SpecialistId,
    SpecialistResult, rank_recommendations,
};
use std::collections::{BTreeMap, HashMap};

/// Everything the aggregator needs from one execution
#[derive(Debug, Clone)]
pub struct AggregationInput {
    pub query: String,
    pub mode: ExecutionMode,
    pub executed: Vec<SpecialistId>,
    pub results: HashMap<SpecialistId, SpecialistResult>,
    pub total_execution_ms: u64,
}

/// Combines results using registration order for tie-breaking
pub struct ResultAggregator {
    registration_order: Vec<SpecialistId>,
}

impl ResultAggregator {
    pub fn new(registration_order: Vec<SpecialistId>) -> Self {
        Self { registration_order }
    }

    pub fn aggregate(&self, input: AggregationInput) -> AggregatedResponse {
        let candidates = self.collect_candidates(&input);
        let ranked = rank_recommendations(candidates);

        let total_savings = deduplicated_savings(&ranked);
        let fallback_count = input
            .results
            .values()
            .filter(|r| r.is_success() && r.used_fallback)
            .count();

        let mut response = AggregatedResponse {
            query: input.query,
            mode: input.mode,
            specialists: input.executed,
            per_specialist_results: input.results,
            ranked_recommendations: ranked,
            executive_summary: String::new(),
            total_estimated_monthly_savings: total_savings,
            fallback_count,
            total_execution_ms: input.total_execution_ms,
            generated_at: chrono::Utc::now().to_rfc3339(),
        };
        response.executive_summary = executive_summary(&response);
        response
    }

    /// Recommendations of successful results, grouped by registration order
    /// (then execution order for unregistered ids) and kept in emission order.
    fn collect_candidates(&self, input: &AggregationInput) -> Vec<Recommendation> {
        let mut order: Vec<&SpecialistId> = self
            .registration_order
            .iter()
            .filter(|id| input.results.contains_key(*id))
            .collect();
        for id in &input.executed {
            if !order.contains(&id) && input.results.contains_key(id) {
                order.push(id);
            }
        }
        let mut rest: Vec<&SpecialistId> = input
            .results
            .keys()
            .filter(|id| !order.contains(id))
            .collect();
        rest.sort();
        order.extend(rest);

        order
            .into_iter()
            .filter_map(|id| input.results.get(id))
            .filter(|r| r.is_success())
            .flat_map(|r| r.recommendations.iter().cloned())
            .collect()
    }
}

/// Monthly savings total, rounded to cents.
///
/// Specialists overlap: idle cleanup or commitments can be proposed by more
/// than one of them. Each specialist's savings are summed per category, and
/// a category contributes only its largest specialist total.
fn deduplicated_savings(ranked: &[RankedRecommendation]) -> f64 {
    let mut per_source: BTreeMap<(&str, &SpecialistId), f64> = BTreeMap::new();
    for item in ranked {
        let rec = &item.recommendation;
        *per_source
            .entry((rec.category.as_str(), &rec.source))
            .or_default() += rec.estimated_monthly_savings;
    }

    let mut per_category: BTreeMap<&str, f64> = BTreeMap::new();
    for ((category, _), savings) in per_source {
        let best = per_category.entry(category).or_default();
        *best = best.max(savings);
    }

    let total: f64 = per_category.values().sum();
    (total * 100.0).round() / 100.0
}

/// Summary built from counts only
fn executive_summary(response: &AggregatedResponse) -> String {
    let total = response.per_specialist_results.len();
    if total == 0 {
        return "No specialists were executed.".to_string();
    }

    let succeeded = response.success_count();
    let failed = response.failure_count();
    let names: Vec<&str> = response
        .specialists
        .iter()
        .map(|id| id.display_name())
        .collect();

    let mut summary = format!(
        "{} specialist(s) analyzed the query in {} mode ({}): {} succeeded",
        total,
        response.mode,
        names.join(", "),
        succeeded
    );
    if response.fallback_count > 0 {
        summary.push_str(&format!(
            ", {} using rule-based fallback",
            response.fallback_count
        ));
    }
    if failed > 0 {
        summary.push_str(&format!(", {} failed", failed));
    }
    summary.push('.');

    match response.ranked_recommendations.first() {
        None => summary.push_str(" No recommendations were produced."),
        Some(top) => {
            let critical = response
                .ranked_recommendations
                .iter()
                .filter(|r| r.priority_level == costwise_domain::PriorityLevel::Critical)
                .count();
            summary.push_str(&format!(
                " {} recommendation(s), {} critical, with estimated savings of ${:.2}/month. Top priority: {} (score {}).",
                response.ranked_recommendations.len(),
                critical,
                response.total_estimated_monthly_savings,
                top.title(),
                top.priority_score
            ));
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use costwise_domain::{Analysis, EffortLevel, ImpactLevel, PriorityLevel};

    fn rec(source: SpecialistId, title: &str, impact: ImpactLevel, effort: EffortLevel) -> Recommendation {
        Recommendation::new(source, title, "general", impact, effort)
    }

    fn result(id: SpecialistId, recs: Vec<Recommendation>) -> SpecialistResult {
        SpecialistResult::from_fallback(id, Analysis::new("ok").with_recommendations(recs), 1)
    }

    fn input(results: Vec<SpecialistResult>) -> AggregationInput {
        AggregationInput {
            query: "q".to_string(),
            mode: ExecutionMode::Parallel,
            executed: results.iter().map(|r| r.specialist.clone()).collect(),
            results: results
                .into_iter()
                .map(|r| (r.specialist.clone(), r))
                .collect(),
            total_execution_ms: 10,
        }
    }

    #[test]
    fn test_ranking_across_specialists() {
        let aggregator = ResultAggregator::new(SpecialistId::canonical_chain());
        let response = aggregator.aggregate(input(vec![
            result(
                SpecialistId::Cost,
                vec![rec(SpecialistId::Cost, "Y", ImpactLevel::Medium, EffortLevel::Medium)],
            ),
            result(
                SpecialistId::Infrastructure,
                vec![rec(SpecialistId::Infrastructure, "X", ImpactLevel::High, EffortLevel::Low)],
            ),
        ]));

        let ranked = &response.ranked_recommendations;
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].title(), "X");
        assert_eq!(ranked[0].priority_score, 12);
        assert_eq!(ranked[0].priority_rank, 1);
        assert_eq!(ranked[0].priority_level, PriorityLevel::Critical);
        assert_eq!(ranked[1].title(), "Y");
        assert_eq!(ranked[1].priority_score, 8);
        assert_eq!(ranked[1].priority_rank, 2);
        assert_eq!(ranked[1].priority_level, PriorityLevel::High);
    }

    #[test]
    fn test_ties_follow_registration_order_not_execution_order() {
        let aggregator = ResultAggregator::new(SpecialistId::canonical_chain());
        let mut agg_input = input(vec![
            result(
                SpecialistId::Financial,
                vec![rec(SpecialistId::Financial, "F1", ImpactLevel::Medium, EffortLevel::Low)],
            ),
            result(
                SpecialistId::Cost,
                vec![
                    rec(SpecialistId::Cost, "C1", ImpactLevel::Medium, EffortLevel::Low),
                    rec(SpecialistId::Cost, "C2", ImpactLevel::Medium, EffortLevel::Low),
                ],
            ),
        ]);
        agg_input.executed = vec![SpecialistId::Financial, SpecialistId::Cost];

        let first = aggregator.aggregate(agg_input.clone());
        let titles: Vec<_> = first.ranked_recommendations.iter().map(|r| r.title()).collect();
        assert_eq!(titles, vec!["C1", "C2", "F1"]);

        let second = aggregator.aggregate(agg_input);
        assert_eq!(first.ranked_recommendations, second.ranked_recommendations);
        assert_eq!(first.executive_summary, second.executive_summary);
    }

    #[test]
    fn test_failed_results_contribute_nothing() {
        let aggregator = ResultAggregator::new(SpecialistId::canonical_chain());
        let response = aggregator.aggregate(input(vec![
            result(
                SpecialistId::Cost,
                vec![rec(SpecialistId::Cost, "A", ImpactLevel::Low, EffortLevel::High)],
            ),
            SpecialistResult::failure(SpecialistId::Financial, "timed out", 5),
        ]));

        assert_eq!(response.ranked_recommendations.len(), 1);
        assert_eq!(response.fallback_count, 1);
        assert!(response.executive_summary.contains("1 failed"));
    }

    #[test]
    fn test_savings_total() {
        let aggregator = ResultAggregator::new(SpecialistId::canonical_chain());
        let response = aggregator.aggregate(input(vec![result(
            SpecialistId::Cost,
            vec![
                rec(SpecialistId::Cost, "A", ImpactLevel::High, EffortLevel::Low).with_savings(100.10),
                rec(SpecialistId::Cost, "B", ImpactLevel::Low, EffortLevel::Low).with_savings(0.2),
            ],
        )]));
        assert_eq!(response.total_estimated_monthly_savings, 100.3);
        assert!(response.executive_summary.contains("$100.30/month"));
        assert!(response.executive_summary.contains("Top priority: A"));
    }

    #[test]
    fn test_overlapping_actions_are_counted_once() {
        let idle = |source: SpecialistId, title: &str| {
            Recommendation::new(source, title, "idle_resources", ImpactLevel::High, EffortLevel::Low)
                .with_savings(810.0)
        };
        let aggregator = ResultAggregator::new(SpecialistId::canonical_chain());
        let response = aggregator.aggregate(input(vec![
            result(
                SpecialistId::Infrastructure,
                vec![idle(SpecialistId::Infrastructure, "Terminate idle VM vm-1")],
            ),
            result(
                SpecialistId::Remediation,
                vec![
                    idle(SpecialistId::Remediation, "Phase 1: clean up idle resources"),
                    rec(SpecialistId::Remediation, "Phase 2", ImpactLevel::Medium, EffortLevel::Medium)
                        .with_savings(40.0),
                ],
            ),
        ]));

        // Both idle recommendations stay in the ranking
        assert_eq!(response.ranked_recommendations.len(), 3);
        assert_eq!(response.total_estimated_monthly_savings, 850.0);
    }

    #[test]
    fn test_empty_input_is_valid() {
        let aggregator = ResultAggregator::new(Vec::new());
        let response = aggregator.aggregate(input(Vec::new()));
        assert!(response.ranked_recommendations.is_empty());
        assert_eq!(response.executive_summary, "No specialists were executed.");
        assert!(!response.generated_at.is_empty());
    }
}
