//! Presentation-level configuration
//!
//! Resolves how results are displayed from command-line flags and the
//! `[output]` section of the config file.

use crate::cli::commands::Cli;
use costwise_domain::OutputFormat;

/// Output configuration for the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Forced color setting; `None` follows terminal detection
    pub color: Option<bool>,
    /// Show the header and progress indicators
    pub show_progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Full,
            color: None,
            show_progress: true,
        }
    }
}

impl OutputConfig {
    /// Command-line flags win over file settings
    pub fn resolve(
        cli: &Cli,
        file_format: Option<OutputFormat>,
        file_color: Option<bool>,
        file_progress: bool,
    ) -> Self {
        let format = cli
            .output
            .map(OutputFormat::from)
            .or(file_format)
            .unwrap_or_default();

        Self {
            format,
            color: file_color,
            // Progress bars would corrupt machine-readable output
            show_progress: file_progress && !cli.quiet && format != OutputFormat::Json,
        }
    }
}
