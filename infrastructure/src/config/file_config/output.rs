//! `[output]` section: how results reach the terminal

use costwise_domain::OutputFormat;
use serde::{Deserialize, Serialize};

/// Display settings from the config file. Command-line flags override them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Report layout when `--output` is not given
    pub format: Option<OutputFormat>,
    /// Force color on or off. Unset leaves it to terminal detection.
    pub color: Option<bool>,
    /// Header and progress bars for interactive runs
    pub progress: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: None,
            progress: true,
        }
    }
}
