//! Analysis parsing from model responses.
//!
//! Supports two formats:
//! 1. ` ```json` fenced code blocks
//! 2. Raw JSON (the whole response, or the outermost `{ ... }` span in it)
//!
//! Expected schema:
//! ```json
//! {
//!   "summary": "string",
//!   "recommendations": [
//!     {
//!       "title": "string",
//!       "category": "string (optional)",
//!       "impact": "high|medium|low",
//!       "effort": "high|medium|low",
//!       "estimated_monthly_savings": 0.0,
//!       "description": "string (optional)"
//!     }
//!   ],
//!   "metrics": { ... }
//! }
//! ```

use super::Analysis;
use crate::core::error::DomainError;
use crate::recommendation::entities::Recommendation;
use crate::recommendation::levels::{EffortLevel, ImpactLevel};
use crate::specialist::identifier::SpecialistId;
use serde_json::Value;

/// Parse a model response into an [`Analysis`] attributed to `source`.
///
/// Any structural problem is a [`DomainError::MalformedModelOutput`].
pub fn parse_analysis(response: &str, source: &SpecialistId) -> Result<Analysis, DomainError> {
    let json = extract_json(response)
        .ok_or_else(|| malformed("response contains no JSON object"))?;
    parse_analysis_json(&json, source)
}

/// Find the JSON payload in a response
fn extract_json(response: &str) -> Option<Value> {
    // Look for ```json ... ``` blocks
    let mut in_block = false;
    let mut current_block = String::new();

    for line in response.lines() {
        let trimmed = line.trim();
        if !in_block && (trimmed == "```json" || trimmed == "```") {
            in_block = true;
            current_block.clear();
        } else if in_block && trimmed == "```" {
            in_block = false;
            if let Ok(parsed) = serde_json::from_str::<Value>(&current_block)
                && parsed.is_object()
            {
                return Some(parsed);
            }
        } else if in_block {
            current_block.push_str(line);
            current_block.push('\n');
        }
    }

    if let Ok(parsed) = serde_json::from_str::<Value>(response.trim())
        && parsed.is_object()
    {
        return Some(parsed);
    }

    // Prose around a bare object
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str::<Value>(&response[start..=end])
        .ok()
        .filter(|v| v.is_object())
}

/// Parse an analysis from an already-decoded JSON value
pub fn parse_analysis_json(json: &Value, source: &SpecialistId) -> Result<Analysis, DomainError> {
    let summary = json
        .get("summary")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| malformed("missing \"summary\""))?;

    let items = json
        .get("recommendations")
        .and_then(|v| v.as_array())
        .ok_or_else(|| malformed("missing \"recommendations\" array"))?;

    let mut analysis = Analysis::new(summary);
    for (index, item) in items.iter().enumerate() {
        analysis = analysis.with_recommendation(parse_recommendation(item, index, source)?);
    }

    if let Some(metrics) = json.get("metrics").and_then(|v| v.as_object()) {
        analysis.metrics = metrics.clone();
    }

    Ok(analysis)
}

fn parse_recommendation(
    item: &Value,
    index: usize,
    source: &SpecialistId,
) -> Result<Recommendation, DomainError> {
    let field = |name: &str| item.get(name).and_then(|v| v.as_str()).map(str::trim);

    let title = field("title")
        .filter(|t| !t.is_empty())
        .ok_or_else(|| malformed(format!("recommendation {} has no title", index + 1)))?;

    let impact: ImpactLevel = field("impact")
        .ok_or_else(|| malformed(format!("recommendation {} has no impact", index + 1)))?
        .parse()
        .map_err(|e: DomainError| malformed(e.to_string()))?;

    let effort: EffortLevel = field("effort")
        .ok_or_else(|| malformed(format!("recommendation {} has no effort", index + 1)))?
        .parse()
        .map_err(|e: DomainError| malformed(e.to_string()))?;

    let category = field("category")
        .filter(|c| !c.is_empty())
        .unwrap_or("general");

    let savings = item
        .get("estimated_monthly_savings")
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);

    let mut rec = Recommendation::new(source.clone(), title, category, impact, effort)
        .with_savings(savings);
    if let Some(description) = field("description").filter(|d| !d.is_empty()) {
        rec = rec.with_description(description);
    }
    Ok(rec)
}

fn malformed(reason: impl Into<String>) -> DomainError {
    DomainError::MalformedModelOutput(reason.into())
}
