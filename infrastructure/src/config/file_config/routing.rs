//! Routing configuration from TOML (`[routing]` section)
//!
//! ```toml
//! [routing]
//! default_specialist = "cost"
//!
//! [[routing.categories]]
//! specialist = "infrastructure"
//! keywords = ["rightsize", "vm", "cpu"]
//! ```
//!
//! Without any `[[routing.categories]]` the built-in keyword table is used.

use costwise_domain::{DomainError, RouteCategory, Router, SpecialistId, standard_categories};
use serde::{Deserialize, Serialize};

/// Raw routing category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRouteCategory {
    pub specialist: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Raw routing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRoutingConfig {
    pub default_specialist: String,
    pub categories: Vec<FileRouteCategory>,
    /// Phrases that select every built-in specialist. `None` keeps the built-in phrases.
    pub full_analysis_keywords: Option<Vec<String>>,
}

impl Default for FileRoutingConfig {
    fn default() -> Self {
        Self {
            default_specialist: SpecialistId::default().as_str().to_string(),
            categories: Vec::new(),
            full_analysis_keywords: None,
        }
    }
}

impl FileRoutingConfig {
    /// Build the router described by this section
    pub fn to_router(&self) -> Result<Router, DomainError> {
        let categories = if self.categories.is_empty() {
            standard_categories()
        } else {
            self.categories
                .iter()
                .map(|c| RouteCategory::new(c.specialist.parse().unwrap_or_default(), &c.keywords))
                .collect()
        };

        let default = self.default_specialist.parse().unwrap_or_default();
        let router = Router::new(categories, default)?;
        Ok(match &self.full_analysis_keywords {
            Some(keywords) => router.with_full_analysis_keywords(keywords),
            None => router,
        })
    }
}
