//! Normalized cost snapshot read from a query's context

use super::mean;
use serde_json::{Map, Value};

/// Days used to project a daily average onto a monthly run-rate
const DAYS_PER_MONTH: f64 = 30.0;

/// Spend attributed to one service
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceCost {
    pub name: String,
    pub cost: f64,
}

/// Utilization and cost of one resource (VM, instance, node, ...)
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceUsage {
    pub id: String,
    pub kind: String,
    /// Average CPU utilization, percent
    pub cpu_utilization: f64,
    /// Average memory utilization, percent
    pub memory_utilization: f64,
    pub monthly_cost: f64,
}

/// Pre-fetched numeric context consumed by the fallback rules.
///
/// Built leniently: missing fields, wrong types and non-finite numbers are
/// treated as absent rather than as errors.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CostSnapshot {
    pub total_cost: f64,
    pub daily_costs: Vec<f64>,
    pub top_services: Vec<ServiceCost>,
    pub resources: Vec<ResourceUsage>,
    pub implementation_cost: Option<f64>,
}

impl CostSnapshot {
    /// Read a snapshot from a context map
    pub fn from_context(context: &Map<String, Value>) -> Self {
        let total_cost = context.get("total_cost").and_then(finite).unwrap_or(0.0).max(0.0);

        let daily_costs = context
            .get("daily_costs")
            .and_then(|v| v.as_array())
            .map(|items| items.iter().filter_map(daily_cost).collect())
            .unwrap_or_default();

        let top_services = context
            .get("top_services")
            .and_then(|v| v.as_array())
            .map(|items| items.iter().filter_map(service_cost).collect())
            .unwrap_or_default();

        let resources = context
            .get("resources")
            .and_then(|v| v.as_array())
            .map(|items| items.iter().filter_map(resource_usage).collect())
            .unwrap_or_default();

        let implementation_cost = context
            .get("implementation_cost")
            .and_then(finite)
            .filter(|c| *c > 0.0);

        Self {
            total_cost,
            daily_costs,
            top_services,
            resources,
            implementation_cost,
        }
    }

    /// Check if there is no usable data at all
    pub fn is_empty(&self) -> bool {
        self.total_cost == 0.0
            && self.daily_costs.is_empty()
            && self.top_services.is_empty()
            && self.resources.is_empty()
    }

    pub fn mean_daily_cost(&self) -> f64 {
        mean(&self.daily_costs)
    }

    /// Monthly spend: `total_cost` when present, otherwise projected from daily costs
    pub fn monthly_run_rate(&self) -> f64 {
        if self.total_cost > 0.0 {
            self.total_cost
        } else {
            self.mean_daily_cost() * DAYS_PER_MONTH
        }
    }

    /// Sum of the listed services' costs
    pub fn services_total(&self) -> f64 {
        self.top_services.iter().map(|s| s.cost).sum()
    }

    /// The most expensive service, if any
    pub fn largest_service(&self) -> Option<&ServiceCost> {
        self.top_services
            .iter()
            .max_by(|a, b| a.cost.total_cmp(&b.cost))
    }
}

fn finite(value: &Value) -> Option<f64> {
    value.as_f64().filter(|v| v.is_finite())
}

/// Accepts either a bare number or `{"date": ..., "cost": n}`
fn daily_cost(value: &Value) -> Option<f64> {
    finite(value)
        .or_else(|| value.get("cost").and_then(finite))
        .map(|c| c.max(0.0))
}

fn service_cost(value: &Value) -> Option<ServiceCost> {
    let name = value
        .get("name")
        .or_else(|| value.get("service"))
        .and_then(|v| v.as_str())?;
    let cost = value.get("cost").and_then(finite)?.max(0.0);
    Some(ServiceCost {
        name: name.to_string(),
        cost,
    })
}

fn resource_usage(value: &Value) -> Option<ResourceUsage> {
    let id = value.get("id").and_then(|v| v.as_str())?;
    let percent = |key: &str| {
        value
            .get(key)
            .and_then(finite)
            .map(|p| p.clamp(0.0, 100.0))
    };
    Some(ResourceUsage {
        id: id.to_string(),
        kind: value
            .get("kind")
            .and_then(|v| v.as_str())
            .unwrap_or("resource")
            .to_string(),
        cpu_utilization: percent("cpu_utilization")?,
        memory_utilization: percent("memory_utilization").unwrap_or(0.0),
        monthly_cost: value.get("monthly_cost").and_then(finite).unwrap_or(0.0).max(0.0),
    })
}
