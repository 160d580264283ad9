//! Progress bar utilities using indicatif for terminal output
//!
//! Bars draw to stderr and hide themselves when stderr is not a terminal.
//! In `--json` mode they are hidden outright so stdout and stderr stay
//! machine-readable.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::domain::ports::ProgressSink;

/// Style templates for different progress bar types
const PROGRESS_TEMPLATE: &str = "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}";
const SPINNER_TEMPLATE: &str = "[{elapsed_precise}] {spinner:.green} {msg}";

/// Progress bar characters for visual effect
const PROGRESS_CHARS: &str = "█▓▒░ ";
const SPINNER_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Create a standard progress bar
pub fn create_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(PROGRESS_TEMPLATE)
            .expect("Invalid progress bar template")
            .progress_chars(PROGRESS_CHARS),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Create a spinner for indeterminate operations
pub fn create_spinner(message: impl Into<String>) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template(SPINNER_TEMPLATE)
            .expect("Invalid spinner template")
            .tick_chars(SPINNER_CHARS),
    );
    spinner.set_message(message.into());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Extension trait for ProgressBar to add common utility methods
pub trait ProgressBarExt {
    /// Finish with a success message (green checkmark)
    fn finish_success(&self, message: impl Into<String>);

    /// Finish with a warning message (yellow !)
    fn finish_warning(&self, message: impl Into<String>);
}

impl ProgressBarExt for ProgressBar {
    fn finish_success(&self, message: impl Into<String>) {
        self.finish_with_message(format!("✓ {}", message.into()));
    }

    fn finish_warning(&self, message: impl Into<String>) {
        self.finish_with_message(format!("! {}", message.into()));
    }
}

/// [`ProgressSink`] that drives one bar, reset at the start of each pass
pub struct PassProgress {
    bar: ProgressBar,
}

impl PassProgress {
    pub fn new(visible: bool) -> Self {
        let bar = if visible {
            create_progress_bar(0)
        } else {
            ProgressBar::hidden()
        };
        Self { bar }
    }

    /// Progress sink that never draws
    pub fn hidden() -> Self {
        Self::new(false)
    }

    pub fn finish_success(&self, message: impl Into<String>) {
        self.bar.finish_success(message);
    }

    pub fn finish_warning(&self, message: impl Into<String>) {
        self.bar.finish_warning(message);
    }

    pub fn abandon(&self) {
        self.bar.abandon();
    }

    #[cfg(test)]
    fn position(&self) -> (u64, Option<u64>) {
        (self.bar.position(), self.bar.length())
    }
}

impl ProgressSink for PassProgress {
    fn pass_started(&self, pass: u32, max_passes: u32) {
        self.bar.reset();
        self.bar.set_length(0);
        self.bar.set_message(format!("pass {pass}/{max_passes}"));
    }

    fn file_completed(&self, completed: usize, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_position(completed as u64);
    }

    fn pass_completed(&self, pass: u32, files: usize, symbols: usize) {
        self.bar
            .println(format!("pass {pass}: {files} files, {symbols} symbols"));
    }
}
