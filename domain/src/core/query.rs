//! Query value object

use crate::specialist::identifier::SpecialistId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Structured context attached to a query (pre-fetched cost data, prior findings, ...)
pub type QueryContext = Map<String, Value>;

/// Context key under which earlier specialists' excerpts are threaded
pub const PRIOR_FINDINGS_KEY: &str = "prior_findings";

/// A cost-optimization question (Value Object)
///
/// Created once per request and never mutated. Context threading in
/// comprehensive mode derives *new* queries via [`Query::with_prior_finding`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Query {
    text: String,
    #[serde(default)]
    context: QueryContext,
}

impl Query {
    /// Create a query with an empty context
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            context: QueryContext::new(),
        }
    }

    /// Create a query with the given structured context
    pub fn with_context(text: impl Into<String>, context: QueryContext) -> Self {
        Self {
            text: text.into(),
            context,
        }
    }

    /// The free-text part of the query
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The structured context map
    pub fn context(&self) -> &QueryContext {
        &self.context
    }

    /// Look up a single context value
    pub fn context_value(&self, key: &str) -> Option<&Value> {
        self.context.get(key)
    }

    /// Derive a new query whose context has one more entry in `prior_findings`.
    pub fn with_prior_finding(&self, finding: PriorFinding) -> Self {
        let mut context = self.context.clone();
        let entry = serde_json::to_value(&finding).unwrap_or(Value::Null);

        match context.get_mut(PRIOR_FINDINGS_KEY) {
            Some(Value::Array(items)) => items.push(entry),
            _ => {
                context.insert(PRIOR_FINDINGS_KEY.to_string(), Value::Array(vec![entry]));
            }
        }

        Self {
            text: self.text.clone(),
            context,
        }
    }

    /// Findings threaded in from earlier specialists, in execution order.
    ///
    /// Entries that do not have the expected shape are skipped.
    pub fn prior_findings(&self) -> Vec<PriorFinding> {
        self.context
            .get(PRIOR_FINDINGS_KEY)
            .and_then(|v| v.as_array())
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| serde_json::from_value(item.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl From<&str> for Query {
    fn from(s: &str) -> Self {
        Query::new(s)
    }
}

impl From<String> for Query {
    fn from(s: String) -> Self {
        Query::new(s)
    }
}

/// Excerpt of an earlier specialist's result, threaded into later prompts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorFinding {
    pub specialist: SpecialistId,
    pub excerpt: String,
}

impl PriorFinding {
    pub fn new(specialist: SpecialistId, excerpt: impl Into<String>) -> Self {
        Self {
            specialist,
            excerpt: excerpt.into(),
        }
    }
}
