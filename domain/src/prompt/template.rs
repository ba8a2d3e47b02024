//! Prompt templates for specialist analysis

use crate::core::query::{PRIOR_FINDINGS_KEY, Query};
use crate::specialist::identifier::SpecialistId;

/// Response format every specialist is asked to follow
const RESPONSE_FORMAT: &str = r#"Respond with a single JSON object in a ```json code block, using exactly this shape:

```json
{
  "summary": "2-4 sentence overview of your findings",
  "recommendations": [
    {
      "title": "short imperative action",
      "category": "e.g. rightsizing, commitments, governance",
      "impact": "high|medium|low",
      "effort": "high|medium|low",
      "estimated_monthly_savings": 0.0,
      "description": "optional detail"
    }
  ],
  "metrics": {}
}
```

Only recommend actions supported by the data. Use 0 for savings you cannot estimate."#;

/// Templates for generating specialist prompts
pub struct SpecialistPromptTemplate;

impl SpecialistPromptTemplate {
    /// System prompt describing the specialist's role
    pub fn system_prompt(specialist: &SpecialistId) -> String {
        match specialist {
            SpecialistId::Cost => r#"You are a cloud cost analyst.
Your task is to analyze spend data for trends, anomalies and concentration in a few services.
Quantify what you find and point at the biggest drivers of cost."#
                .to_string(),
            SpecialistId::Infrastructure => r#"You are a cloud infrastructure engineer focused on rightsizing.
Your task is to find idle, oversized and saturated resources from utilization data.
Prefer concrete resource-level actions over general advice."#
                .to_string(),
            SpecialistId::Financial => r#"You are a FinOps financial analyst.
Your task is to estimate return on investment, payback periods and commitment opportunities.
State your assumptions whenever you estimate savings."#
                .to_string(),
            SpecialistId::Remediation => r#"You are a cloud remediation planner.
Your task is to turn findings into a phased action plan: quick wins first, then optimization, then governance.
Build on findings from earlier analysts when they are provided."#
                .to_string(),
            SpecialistId::Custom(name) => format!(
                "You are the {} specialist in a cloud cost-optimization team.\nAnalyze the data you are given and recommend concrete actions.",
                name
            ),
        }
    }

    /// User prompt for one analysis: the question, its data and earlier findings
    pub fn analysis_prompt(specialist: &SpecialistId, query: &Query) -> String {
        let mut prompt = format!(
            "Question from the user:\n{}\n\nYou are answering as the {}.\n",
            query.text(),
            specialist.display_name()
        );

        let data: serde_json::Map<_, _> = query
            .context()
            .iter()
            .filter(|(key, _)| key.as_str() != PRIOR_FINDINGS_KEY)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        if data.is_empty() {
            prompt.push_str("\nNo cost data was provided; base your answer on the question alone.\n");
        } else {
            let rendered = serde_json::to_string_pretty(&data).unwrap_or_default();
            prompt.push_str(&format!("\nCost data:\n```json\n{}\n```\n", rendered));
        }

        let findings = query.prior_findings();
        if !findings.is_empty() {
            prompt.push_str("\nFindings from earlier analysts:\n");
            for finding in &findings {
                prompt.push_str(&format!(
                    "\n--- {} ---\n{}\n",
                    finding.specialist.display_name(),
                    finding.excerpt
                ));
            }
        }

        prompt.push('\n');
        prompt.push_str(RESPONSE_FORMAT);
        prompt
    }
}
