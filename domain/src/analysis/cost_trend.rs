//! Cost trend fallback rule
//!
//! Compares the mean of the first and second half of the daily cost series:
//! more than +10% is an increasing trend, less than -10% a decreasing one.
//! A coefficient of variation above 0.25 flags volatile spend.

use super::{Analysis, CostSnapshot, FallbackRule, mean, round2, std_dev};
use crate::core::query::Query;
use crate::recommendation::entities::Recommendation;
use crate::recommendation::levels::{EffortLevel, ImpactLevel};
use crate::specialist::identifier::SpecialistId;
use serde::Serialize;

const TREND_THRESHOLD_PERCENT: f64 = 10.0;
const STEEP_TREND_PERCENT: f64 = 25.0;
const VOLATILITY_THRESHOLD: f64 = 0.25;
/// A service above this share of spend is a concentration risk
const CONCENTRATION_SHARE: f64 = 0.4;

/// Direction of spend over the observed window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Increasing => "increasing",
            Trend::Decreasing => "decreasing",
            Trend::Stable => "stable",
        }
    }
}

/// Trend and volatility figures for a daily cost series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendStats {
    pub trend: Trend,
    pub change_percent: f64,
    /// Coefficient of variation (std dev / mean)
    pub volatility: f64,
    pub first_half_mean: f64,
    pub second_half_mean: f64,
}

/// Compute trend statistics; a series shorter than two points is stable.
pub fn trend_stats(daily: &[f64]) -> TrendStats {
    if daily.len() < 2 {
        let m = mean(daily);
        return TrendStats {
            trend: Trend::Stable,
            change_percent: 0.0,
            volatility: 0.0,
            first_half_mean: m,
            second_half_mean: m,
        };
    }

    let half = daily.len() / 2;
    let first = mean(&daily[..half]);
    let second = mean(&daily[half..]);
    let change_percent = if first > 0.0 {
        (second - first) / first * 100.0
    } else {
        0.0
    };

    let trend = if change_percent > TREND_THRESHOLD_PERCENT {
        Trend::Increasing
    } else if change_percent < -TREND_THRESHOLD_PERCENT {
        Trend::Decreasing
    } else {
        Trend::Stable
    };

    let overall = mean(daily);
    let volatility = if overall > 0.0 {
        std_dev(daily) / overall
    } else {
        0.0
    };

    TrendStats {
        trend,
        change_percent,
        volatility,
        first_half_mean: first,
        second_half_mean: second,
    }
}

/// Trend-from-variance analysis for the cost specialist
pub struct CostTrendRule;

impl FallbackRule for CostTrendRule {
    fn specialist(&self) -> SpecialistId {
        SpecialistId::Cost
    }

    fn analyze(&self, _query: &Query, snapshot: &CostSnapshot) -> Analysis {
        let id = self.specialist();

        if snapshot.is_empty() {
            return Analysis::new(
                "No cost data was available; establish a spend baseline before optimizing.",
            )
            .with_recommendation(Recommendation::new(
                id,
                "Establish a cost baseline with daily spend exports",
                "visibility",
                ImpactLevel::Medium,
                EffortLevel::Low,
            ));
        }

        let stats = trend_stats(&snapshot.daily_costs);
        let run_rate = snapshot.monthly_run_rate();
        let mut recommendations = Vec::new();

        if stats.trend == Trend::Increasing {
            let impact = if stats.change_percent > STEEP_TREND_PERCENT {
                ImpactLevel::High
            } else {
                ImpactLevel::Medium
            };
            let monthly_growth = (stats.second_half_mean - stats.first_half_mean).max(0.0) * 30.0;
            recommendations.push(
                Recommendation::new(
                    id.clone(),
                    "Investigate the drivers of rising spend",
                    "cost_trend",
                    impact,
                    EffortLevel::Low,
                )
                .with_savings(monthly_growth)
                .with_description(format!(
                    "Daily spend rose {:.1}% between the two halves of the period.",
                    stats.change_percent
                )),
            );
        }

        if stats.volatility > VOLATILITY_THRESHOLD {
            recommendations.push(
                Recommendation::new(
                    id.clone(),
                    "Set up anomaly alerts for volatile daily spend",
                    "monitoring",
                    ImpactLevel::Medium,
                    EffortLevel::Low,
                )
                .with_savings(run_rate * 0.05),
            );
        }

        let services_total = if snapshot.total_cost > 0.0 {
            snapshot.total_cost
        } else {
            snapshot.services_total()
        };
        if let Some(service) = snapshot.largest_service() {
            let share = if services_total > 0.0 {
                service.cost / services_total
            } else {
                0.0
            };
            let impact = if share > CONCENTRATION_SHARE {
                ImpactLevel::High
            } else {
                ImpactLevel::Medium
            };
            recommendations.push(
                Recommendation::new(
                    id.clone(),
                    format!("Review {} spend for optimization opportunities", service.name),
                    "service_optimization",
                    impact,
                    EffortLevel::Medium,
                )
                .with_savings(service.cost * 0.2)
                .with_description(format!(
                    "{} accounts for {:.0}% of spend.",
                    service.name,
                    share * 100.0
                )),
            );
        }

        if recommendations.is_empty() {
            recommendations.push(Recommendation::new(
                id,
                "Keep monitoring spend against the current baseline",
                "monitoring",
                ImpactLevel::Low,
                EffortLevel::Low,
            ));
        }

        let summary = format!(
            "Cost trend is {} ({:+.1}% between periods); monthly run-rate ${:.2}; volatility {:.2}.",
            stats.trend.as_str(),
            stats.change_percent,
            run_rate,
            stats.volatility
        );

        Analysis::new(summary)
            .with_recommendations(recommendations)
            .with_metric("trend", stats.trend.as_str())
            .with_metric("change_percent", round2(stats.change_percent))
            .with_metric("volatility", round2(stats.volatility))
            .with_metric("monthly_run_rate", round2(run_rate))
            .with_metric("total_cost", round2(snapshot.total_cost))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot(value: serde_json::Value) -> CostSnapshot {
        CostSnapshot::from_context(value.as_object().unwrap())
    }

    #[test]
    fn test_increasing_trend() {
        let stats = trend_stats(&[100.0, 100.0, 130.0, 130.0]);
        assert_eq!(stats.trend, Trend::Increasing);
        assert!((stats.change_percent - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_decreasing_and_stable() {
        assert_eq!(trend_stats(&[100.0, 80.0]).trend, Trend::Decreasing);
        assert_eq!(trend_stats(&[100.0, 105.0]).trend, Trend::Stable);
        assert_eq!(trend_stats(&[42.0]).trend, Trend::Stable);
        assert_eq!(trend_stats(&[]).trend, Trend::Stable);
    }

    #[test]
    fn test_zero_baseline_does_not_divide_by_zero() {
        let stats = trend_stats(&[0.0, 0.0, 50.0, 50.0]);
        assert_eq!(stats.change_percent, 0.0);
        assert!(stats.volatility.is_finite());
    }

    #[test]
    fn test_rule_flags_rising_spend_and_concentration() {
        let analysis = CostTrendRule.analyze(
            &Query::new("why is my bill going up"),
            &snapshot(json!({
                "total_cost": 4000.0,
                "daily_costs": [100.0, 100.0, 160.0, 160.0],
                "top_services": [{"name": "EC2", "cost": 2500.0}, {"name": "RDS", "cost": 800.0}]
            })),
        );

        assert_eq!(analysis.metrics["trend"], "increasing");
        let titles: Vec<_> = analysis.recommendations.iter().map(|r| r.title.as_str()).collect();
        assert!(titles.contains(&"Investigate the drivers of rising spend"));
        let ec2 = analysis
            .recommendations
            .iter()
            .find(|r| r.title.contains("EC2"))
            .unwrap();
        assert_eq!(ec2.impact, ImpactLevel::High);
        assert_eq!(ec2.estimated_monthly_savings, 500.0);
        assert!(analysis.recommendations.iter().all(|r| r.source == SpecialistId::Cost));
    }

    #[test]
    fn test_rule_without_data_still_recommends() {
        let analysis = CostTrendRule.analyze(&Query::new(""), &CostSnapshot::default());
        assert_eq!(analysis.recommendations.len(), 1);
        assert!(!analysis.summary.is_empty());
    }
}
