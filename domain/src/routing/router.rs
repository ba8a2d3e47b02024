//! Keyword router

use crate::core::error::DomainError;
use crate::specialist::identifier::SpecialistId;
use serde::{Deserialize, Serialize};

/// Phrases that request every built-in specialist
const DEFAULT_FULL_ANALYSIS_KEYWORDS: &[&str] =
    &["comprehensive", "full analysis", "complete analysis"];

/// A routing category: any keyword hit selects the specialist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteCategory {
    pub specialist: SpecialistId,
    pub keywords: Vec<String>,
}

impl RouteCategory {
    /// Keywords are stored lowercase so matching stays case-insensitive
    pub fn new<I, S>(specialist: SpecialistId, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            specialist,
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    fn matches(&self, lowered_query: &str) -> bool {
        self.keywords
            .iter()
            .any(|k| matches_at_word_start(lowered_query, k))
    }
}

/// Keyword occurs where a word begins. Stems may run on ("rightsiz" hits
/// "rightsizing") but "roi" does not hit "android".
fn matches_at_word_start(text: &str, keyword: &str) -> bool {
    text.match_indices(keyword).any(|(i, _)| {
        text[..i]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric())
    })
}

/// Selects specialists for a query.
///
/// Categories are checked in table order and are not mutually exclusive.
/// The output is de-duplicated (first-seen order) and never empty: a query
/// that matches nothing goes to the default specialist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Router {
    categories: Vec<RouteCategory>,
    default_specialist: SpecialistId,
    full_analysis_keywords: Vec<String>,
}

impl Router {
    /// Build a router from a routing table.
    ///
    /// A category without keywords can never match and is rejected.
    pub fn new(
        categories: Vec<RouteCategory>,
        default_specialist: SpecialistId,
    ) -> Result<Self, DomainError> {
        if let Some(empty) = categories.iter().find(|c| c.keywords.is_empty()) {
            return Err(DomainError::InvalidRoutingTable(format!(
                "category '{}' has no keywords",
                empty.specialist
            )));
        }

        Ok(Self {
            categories,
            default_specialist,
            full_analysis_keywords: DEFAULT_FULL_ANALYSIS_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
        })
    }

    /// The built-in routing table for the four standard specialists
    pub fn standard() -> Self {
        Self {
            categories: standard_categories(),
            default_specialist: SpecialistId::default(),
            full_analysis_keywords: DEFAULT_FULL_ANALYSIS_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
        }
    }

    pub fn with_default(mut self, specialist: SpecialistId) -> Self {
        self.default_specialist = specialist;
        self
    }

    /// Replace the phrases that select the whole canonical chain.
    /// An empty list disables the override.
    pub fn with_full_analysis_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.full_analysis_keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        self
    }

    pub fn categories(&self) -> &[RouteCategory] {
        &self.categories
    }

    pub fn default_specialist(&self) -> &SpecialistId {
        &self.default_specialist
    }

    /// Whether the query asks for the full canonical chain
    pub fn is_full_analysis(&self, query: &str) -> bool {
        let lowered = query.to_lowercase();
        self.full_analysis_keywords
            .iter()
            .any(|k| matches_at_word_start(&lowered, k))
    }

    /// Route a query to an ordered, de-duplicated, non-empty specialist list
    pub fn route(&self, query: &str) -> Vec<SpecialistId> {
        let lowered = query.trim().to_lowercase();
        if lowered.is_empty() {
            return vec![self.default_specialist.clone()];
        }

        if self.is_full_analysis(&lowered) {
            return SpecialistId::canonical_chain();
        }

        let mut selected: Vec<SpecialistId> = Vec::new();
        for category in &self.categories {
            if category.matches(&lowered) && !selected.contains(&category.specialist) {
                selected.push(category.specialist.clone());
            }
        }

        if selected.is_empty() {
            selected.push(self.default_specialist.clone());
        }
        selected
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::standard()
    }
}

/// Default keyword table. Stems like "rightsiz" cover "rightsize"/"rightsizing".
pub fn standard_categories() -> Vec<RouteCategory> {
    vec![
        RouteCategory::new(
            SpecialistId::Cost,
            ["cost", "spend", "bill", "trend", "expense", "anomal", "forecast"],
        ),
        RouteCategory::new(
            SpecialistId::Infrastructure,
            [
                "rightsiz",
                "right-siz",
                "vm",
                "instance",
                "server",
                "cpu",
                "memory",
                "utilization",
                "infrastructure",
                "idle",
                "compute",
                "storage",
                "kubernetes",
            ],
        ),
        RouteCategory::new(
            SpecialistId::Financial,
            [
                "roi",
                "return on investment",
                "payback",
                "npv",
                "budget",
                "savings",
                "save",
                "financial",
                "invest",
            ],
        ),
        RouteCategory::new(
            SpecialistId::Remediation,
            [
                "remediat",
                "fix",
                "action plan",
                "implement",
                "plan",
                "steps",
                "automate",
            ],
        ),
    ]
}
