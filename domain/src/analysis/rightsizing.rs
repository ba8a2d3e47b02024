//! Infrastructure rightsizing fallback rule
//!
//! Threshold classification of each resource's average utilization:
//!
//! | CPU        | Memory  | Classification | Estimated savings   |
//! |------------|---------|----------------|---------------------|
//! | < 5%       | any     | idle           | 90% of monthly cost |
//! | < 20%      | < 40%   | oversized      | 40% of monthly cost |
//! | > 85%      | any     | saturated      | none                |
//! | otherwise  |         | right-sized    | none                |

use super::{Analysis, CostSnapshot, FallbackRule, ResourceUsage, round2};
use crate::core::query::Query;
use crate::recommendation::entities::Recommendation;
use crate::recommendation::levels::{EffortLevel, ImpactLevel};
use crate::specialist::identifier::SpecialistId;

const IDLE_CPU: f64 = 5.0;
const OVERSIZED_CPU: f64 = 20.0;
const OVERSIZED_MEMORY: f64 = 40.0;
const SATURATED_CPU: f64 = 85.0;
const IDLE_SAVINGS_RATIO: f64 = 0.9;
const RIGHTSIZE_SAVINGS_RATIO: f64 = 0.4;
/// Share of compute spend assumed recoverable through commitments when no
/// per-resource data is available
const COMMITMENT_SAVINGS_RATIO: f64 = 0.2;

/// Service names treated as compute when no resource list is present
const COMPUTE_SERVICE_HINTS: &[&str] = &[
    "ec2",
    "compute",
    "virtual machine",
    "vm",
    "instance",
    "kubernetes",
    "gke",
    "aks",
    "eks",
];

/// Utilization-based classification of a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sizing {
    Idle,
    Oversized,
    Saturated,
    RightSized,
}

/// Classify a resource by its CPU and memory utilization
pub fn classify(resource: &ResourceUsage) -> Sizing {
    if resource.cpu_utilization < IDLE_CPU {
        Sizing::Idle
    } else if resource.cpu_utilization < OVERSIZED_CPU
        && resource.memory_utilization < OVERSIZED_MEMORY
    {
        Sizing::Oversized
    } else if resource.cpu_utilization > SATURATED_CPU {
        Sizing::Saturated
    } else {
        Sizing::RightSized
    }
}

fn impact_for_savings(monthly: f64) -> ImpactLevel {
    if monthly >= 500.0 {
        ImpactLevel::High
    } else if monthly >= 100.0 {
        ImpactLevel::Medium
    } else {
        ImpactLevel::Low
    }
}

/// Threshold-based rightsizing for the infrastructure specialist
pub struct RightsizingRule;

impl RightsizingRule {
    fn from_resources(&self, snapshot: &CostSnapshot) -> Analysis {
        let id = self.specialist();
        let mut recommendations = Vec::new();
        let (mut idle, mut oversized, mut saturated) = (0usize, 0usize, 0usize);

        for resource in &snapshot.resources {
            match classify(resource) {
                Sizing::Idle => {
                    idle += 1;
                    let savings = resource.monthly_cost * IDLE_SAVINGS_RATIO;
                    recommendations.push(
                        Recommendation::new(
                            id.clone(),
                            format!("Terminate idle {} {}", resource.kind, resource.id),
                            "idle_resources",
                            match impact_for_savings(savings) {
                                ImpactLevel::High => ImpactLevel::High,
                                _ => ImpactLevel::Medium,
                            },
                            EffortLevel::Low,
                        )
                        .with_savings(savings)
                        .with_description(format!(
                            "Average CPU {:.1}%.",
                            resource.cpu_utilization
                        )),
                    );
                }
                Sizing::Oversized => {
                    oversized += 1;
                    let savings = resource.monthly_cost * RIGHTSIZE_SAVINGS_RATIO;
                    recommendations.push(
                        Recommendation::new(
                            id.clone(),
                            format!("Rightsize {} {}", resource.kind, resource.id),
                            "rightsizing",
                            impact_for_savings(savings),
                            EffortLevel::Medium,
                        )
                        .with_savings(savings)
                        .with_description(format!(
                            "Average CPU {:.1}%, memory {:.1}%.",
                            resource.cpu_utilization, resource.memory_utilization
                        )),
                    );
                }
                Sizing::Saturated => {
                    saturated += 1;
                    recommendations.push(
                        Recommendation::new(
                            id.clone(),
                            format!("Scale up saturated {} {}", resource.kind, resource.id),
                            "performance",
                            ImpactLevel::Medium,
                            EffortLevel::Medium,
                        )
                        .with_description(format!(
                            "Average CPU {:.1}% risks throttling.",
                            resource.cpu_utilization
                        )),
                    );
                }
                Sizing::RightSized => {}
            }
        }

        let savings: f64 = recommendations.iter().map(|r| r.estimated_monthly_savings).sum();
        let summary = format!(
            "Reviewed {} resources: {} idle, {} oversized, {} saturated; estimated rightsizing savings ${:.2}/month.",
            snapshot.resources.len(),
            idle,
            oversized,
            saturated,
            savings
        );

        Analysis::new(summary)
            .with_recommendations(recommendations)
            .with_metric("resources_reviewed", snapshot.resources.len())
            .with_metric("idle", idle)
            .with_metric("oversized", oversized)
            .with_metric("saturated", saturated)
            .with_metric("estimated_monthly_savings", round2(savings))
    }

    fn from_services(&self, snapshot: &CostSnapshot) -> Analysis {
        let id = self.specialist();
        let compute_spend: f64 = snapshot
            .top_services
            .iter()
            .filter(|s| {
                let name = s.name.to_lowercase();
                COMPUTE_SERVICE_HINTS.iter().any(|hint| name.contains(hint))
            })
            .map(|s| s.cost)
            .sum();

        let mut analysis = Analysis::new(format!(
            "No per-resource utilization data; identified ${:.2}/month of compute spend.",
            compute_spend
        ))
        .with_recommendation(Recommendation::new(
            id.clone(),
            "Collect CPU and memory utilization for compute resources",
            "visibility",
            ImpactLevel::Medium,
            EffortLevel::Low,
        ))
        .with_metric("compute_spend", round2(compute_spend));

        if compute_spend > 0.0 {
            let savings = compute_spend * COMMITMENT_SAVINGS_RATIO;
            analysis = analysis.with_recommendation(
                Recommendation::new(
                    id,
                    "Cover steady compute usage with reserved capacity or savings plans",
                    "commitments",
                    impact_for_savings(savings),
                    EffortLevel::Medium,
                )
                .with_savings(savings),
            );
        }

        analysis
    }
}

impl FallbackRule for RightsizingRule {
    fn specialist(&self) -> SpecialistId {
        SpecialistId::Infrastructure
    }

    fn analyze(&self, _query: &Query, snapshot: &CostSnapshot) -> Analysis {
        if snapshot.resources.is_empty() {
            self.from_services(snapshot)
        } else {
            self.from_resources(snapshot)
        }
    }
}
