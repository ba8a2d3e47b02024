//! Output formatter trait

use costwise_domain::{AggregatedResponse, OutputFormat};

/// Trait for formatting analysis responses
pub trait OutputFormatter {
    /// Format the complete response
    fn format(&self, response: &AggregatedResponse) -> String;

    /// Format as JSON
    fn format_json(&self, response: &AggregatedResponse) -> String;

    /// Executive summary and ranked recommendations only
    fn format_summary(&self, response: &AggregatedResponse) -> String;

    /// Dispatch on the configured format
    fn render(&self, response: &AggregatedResponse, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => self.format(response),
            OutputFormat::Summary => self.format_summary(response),
            OutputFormat::Json => self.format_json(response),
        }
    }
}
