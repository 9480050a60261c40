//! Progress reporting for the audit walk
//!
//! Spinner on stderr via indicatif; the report lines themselves go to
//! stdout, so piping the report stays clean.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::Ordering;
use std::time::Duration;

use crate::audit::coordinator::{AuditResult, AuditStats};

/// Progress reporter that displays walk status
#[derive(Clone)]
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();

        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .expect("invalid progress template")
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );

        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Update the display from the shared walk counters
    pub fn update(&self, stats: &AuditStats) {
        let msg = format!(
            "Groups: {} | Projects: {} | Members: {} | Reported: {}",
            stats.groups_visited.load(Ordering::Relaxed),
            stats.projects_visited.load(Ordering::Relaxed),
            stats.members_seen.load(Ordering::Relaxed),
            stats.records_reported.load(Ordering::Relaxed),
        );

        self.bar.set_message(msg);
    }

    /// Set a status message
    pub fn set_status(&self, status: &str) {
        self.bar.set_message(status.to_string());
    }

    /// Finish and clear the progress display
    pub fn finish_and_clear(&self) {
        self.bar.finish_and_clear();
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Print the run header
pub fn print_header(group: &str, base_url: &str, concurrency: usize) {
    eprintln!(
        "{} {}",
        style("Auditing").bold().green(),
        style(group).bold()
    );
    eprintln!("  API: {}  concurrency: {}", base_url, concurrency);
    eprintln!();
}

/// Print a summary of the audit results
pub fn print_summary(result: &AuditResult) {
    eprintln!();
    eprintln!("{}", style("Audit complete").bold().green());
    eprintln!("  Groups visited:   {}", result.groups_visited);
    eprintln!("  Projects visited: {}", result.projects_visited);
    eprintln!("  Members seen:     {}", result.members_seen);
    eprintln!("  Reported:         {}", result.records_reported);
    eprintln!("  Elapsed:          {:.2?}", result.duration);
}
