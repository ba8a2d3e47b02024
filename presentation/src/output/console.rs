//! Console output formatter for analysis results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use costwise_domain::{AggregatedResponse, PriorityLevel, RankedRecommendation, SpecialistResult};

/// Formats aggregated responses for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete response
    pub fn format(response: &AggregatedResponse) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Cost Optimization Analysis"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Query:".cyan().bold(),
            response.query
        ));
        output.push_str(&format!(
            "{} {} ({})\n\n",
            "Specialists:".cyan().bold(),
            Self::specialist_names(response),
            response.mode
        ));

        output.push_str(&Self::section_header("Executive Summary"));
        output.push_str(&format!("\n{}\n", response.executive_summary));

        output.push_str(&Self::section_header("Ranked Recommendations"));
        output.push_str(&Self::recommendations(&response.ranked_recommendations));

        output.push_str(&Self::section_header("Specialist Findings"));
        for result in response.ordered_results() {
            output.push_str(&Self::specialist_block(result));
        }

        output.push_str(&format!(
            "\n{} ${:.2}/month | {} fallback | {}ms | {}\n",
            "Estimated savings:".green().bold(),
            response.total_estimated_monthly_savings,
            response.fallback_count,
            response.total_execution_ms,
            response.generated_at.dimmed()
        ));

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(response: &AggregatedResponse) -> String {
        serde_json::to_string_pretty(response).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the summary only (concise output)
    pub fn format_summary(response: &AggregatedResponse) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== Cost Optimization Summary ===".cyan().bold()
        ));

        output.push_str(&format!("{} {}\n\n", "Q:".bold(), response.query));
        output.push_str(&format!(
            "{} {}\n\n",
            "Specialists consulted:".dimmed(),
            Self::specialist_names(response)
        ));

        output.push_str(&response.executive_summary);
        output.push('\n');
        output.push_str(&Self::recommendations(response.top(5)));

        output
    }

    fn specialist_names(response: &AggregatedResponse) -> String {
        response
            .specialists
            .iter()
            .map(|id| id.display_name())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn recommendations(ranked: &[RankedRecommendation]) -> String {
        if ranked.is_empty() {
            return format!("\n  {}\n", "No recommendations.".dimmed());
        }

        let mut output = String::from("\n");
        for item in ranked {
            let rec = &item.recommendation;
            let level = match item.priority_level {
                PriorityLevel::Critical => item.priority_level.as_str().red().bold(),
                PriorityLevel::High => item.priority_level.as_str().yellow().bold(),
                PriorityLevel::Medium => item.priority_level.as_str().normal(),
            };
            output.push_str(&format!(
                "  {:>2}. [{}] {} (score {})\n",
                item.priority_rank,
                level,
                rec.title.bold(),
                item.priority_score
            ));
            output.push_str(&format!(
                "      {} | impact {} | effort {} | ${:.2}/month | {}\n",
                rec.category,
                rec.impact.as_str(),
                rec.effort.as_str(),
                rec.estimated_monthly_savings,
                item.source().display_name().dimmed()
            ));
            if let Some(description) = &rec.description {
                output.push_str(&Self::indent(description, "      "));
                output.push('\n');
            }
        }
        output
    }

    fn specialist_block(result: &SpecialistResult) -> String {
        let name = result.specialist.display_name();
        if result.is_success() {
            let origin = if result.used_fallback {
                "rule-based"
            } else {
                "model"
            };
            format!(
                "\n{} {}\n{}\n",
                format!("── {} ──", name).yellow().bold(),
                format!("({}, {}ms)", origin, result.duration_ms).dimmed(),
                result.content
            )
        } else {
            format!(
                "\n{}\nError: {}\n",
                format!("── {} ──", name).red().bold(),
                result.error.as_deref().unwrap_or("Unknown")
            )
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, response: &AggregatedResponse) -> String {
        Self::format(response)
    }

    fn format_json(&self, response: &AggregatedResponse) -> String {
        Self::format_json(response)
    }

    fn format_summary(&self, response: &AggregatedResponse) -> String {
        Self::format_summary(response)
    }
}
