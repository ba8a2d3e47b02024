//! CLI command definitions

use clap::{Parser, ValueEnum};
use costwise_domain::ExecutionMode;
use std::path::PathBuf;

/// Output format for analysis results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Summary, ranked recommendations and every specialist's findings
    Full,
    /// Executive summary and ranked recommendations only
    Summary,
    /// JSON output
    Json,
}

impl From<OutputFormat> for costwise_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => Self::Full,
            OutputFormat::Summary => Self::Summary,
            OutputFormat::Json => Self::Json,
        }
    }
}

/// CLI arguments for costwise
#[derive(Parser, Debug)]
#[command(name = "costwise")]
#[command(author, version, about = "Cost optimization analysis with routed specialists")]
#[command(long_about = r#"
costwise routes a cost question to the relevant specialists (cost analysis,
infrastructure, financial, remediation), runs them and merges their
recommendations into one ranked list.

Execution modes:
  single         Run only the first routed specialist
  parallel       Run all routed specialists concurrently
  sequential     Run routed specialists one after another
  comprehensive  Run in order, passing earlier findings to later specialists

Configuration files are loaded from (in priority order):
1. COSTWISE_* environment variables
2. --config <path>     Explicit config file
3. ./costwise.toml     Project-level config
4. ~/.config/costwise/config.toml   Global config

Example:
  costwise "Why did my bill go up?" --context costs.json
  costwise "rightsize my VMs and show ROI" --mode parallel -o json
  costwise "full analysis" --context costs.json
"#)]
pub struct Cli {
    /// The cost question to analyze
    pub query: Option<String>,

    /// Execution mode (defaults to the configured mode)
    #[arg(short, long, value_name = "MODE")]
    pub mode: Option<ExecutionMode>,

    /// JSON file with pre-fetched cost data
    #[arg(long, value_name = "PATH")]
    pub context: Option<PathBuf>,

    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the header and progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Directory for the execution log and trace log files
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}
