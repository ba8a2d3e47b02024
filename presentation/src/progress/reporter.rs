//! Progress reporting for orchestrated analyses

use colored::Colorize;
use costwise_application::ports::progress::ProgressNotifier;
use costwise_domain::{ExecutionMode, SpecialistId, SpecialistResult};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress during an analysis with a progress bar
pub struct ProgressReporter {
    multi: MultiProgress,
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            bar: Mutex::new(None),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .map(|style| style.progress_chars("=>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
    }

    fn mode_display_name(mode: ExecutionMode) -> &'static str {
        match mode {
            ExecutionMode::Single => "Single specialist",
            ExecutionMode::Parallel => "Parallel analysis",
            ExecutionMode::Sequential => "Sequential analysis",
            ExecutionMode::Comprehensive => "Comprehensive analysis",
        }
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.bar.lock()
            && let Some(pb) = guard.as_ref()
        {
            f(pb);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_execution_start(&self, mode: ExecutionMode, specialists: &[SpecialistId]) {
        let total = match mode {
            ExecutionMode::Single => specialists.len().min(1),
            _ => specialists.len(),
        };

        let pb = self.multi.add(ProgressBar::new(total as u64));
        pb.set_style(Self::bar_style());
        pb.set_prefix(Self::mode_display_name(mode));
        pb.set_message("Starting...");
        pb.enable_steady_tick(Duration::from_millis(120));

        if let Ok(mut guard) = self.bar.lock() {
            *guard = Some(pb);
        }
    }

    fn on_specialist_start(&self, specialist: &SpecialistId) {
        self.with_bar(|pb| pb.set_message(format!("{}...", specialist.display_name())));
    }

    fn on_specialist_complete(&self, result: &SpecialistResult) {
        self.with_bar(|pb| {
            let name = result.specialist.display_name();
            let status = if !result.is_success() {
                format!("{} {}", "x".red(), name)
            } else if result.used_fallback {
                format!("{} {} (rule-based)", "v".yellow(), name)
            } else {
                format!("{} {}", "v".green(), name)
            };
            pb.set_message(status);
            pb.inc(1);
        });
    }

    fn on_execution_complete(&self, total_ms: u64) {
        if let Ok(mut guard) = self.bar.lock()
            && let Some(pb) = guard.take()
        {
            pb.finish_with_message(format!("{} ({}ms)", "complete!".green(), total_ms));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_execution_start(&self, mode: ExecutionMode, specialists: &[SpecialistId]) {
        println!(
            "{} {} ({} specialists)",
            "->".cyan(),
            ProgressReporter::mode_display_name(mode).bold(),
            specialists.len()
        );
    }

    fn on_specialist_start(&self, _specialist: &SpecialistId) {}

    fn on_specialist_complete(&self, result: &SpecialistResult) {
        let name = result.specialist.display_name();
        if result.is_success() {
            println!("  {} {} ({}ms)", "v".green(), name, result.duration_ms);
        } else {
            println!(
                "  {} {} (failed: {})",
                "x".red(),
                name,
                result.error.as_deref().unwrap_or("unknown")
            );
        }
    }

    fn on_execution_complete(&self, _total_ms: u64) {
        println!();
    }
}
