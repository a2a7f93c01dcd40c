//! Progress spinners.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use super::theme::InstallerTheme;
use super::SpinnerHandle;

/// A progress spinner for long-running operations.
pub struct ProgressSpinner {
    bar: ProgressBar,
    theme: InstallerTheme,
}

impl ProgressSpinner {
    /// Create a new spinner with a message.
    pub fn new(message: &str, theme: InstallerTheme) -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
        {
            bar.set_style(style);
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));

        Self { bar, theme }
    }

    /// Create a spinner that doesn't draw (quiet mode).
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            theme: InstallerTheme::plain(),
        }
    }

    fn finish_with(&mut self, formatted: String) {
        if let Ok(style) = ProgressStyle::default_spinner().template("{msg}") {
            self.bar.set_style(style);
        }
        self.bar.finish_with_message(formatted);
    }
}

impl SpinnerHandle for ProgressSpinner {
    fn finish_success(&mut self, msg: &str) {
        let formatted = self.theme.format_success(msg);
        self.finish_with(formatted);
    }

    fn finish_error(&mut self, msg: &str) {
        let formatted = self.theme.format_error(msg);
        self.finish_with(formatted);
    }

    fn finish_skipped(&mut self, msg: &str) {
        let formatted = self.theme.format_skipped(msg);
        self.finish_with(formatted);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_spinner() {
        let mut spinner = ProgressSpinner::hidden();
        spinner.finish_success("Downloaded");
    }

    #[test]
    fn spinner_finish_error() {
        let mut spinner = ProgressSpinner::new("Running", InstallerTheme::plain());
        spinner.finish_error("Failed");
    }

    #[test]
    fn spinner_finish_skipped() {
        let mut spinner = ProgressSpinner::new("Checking", InstallerTheme::plain());
        spinner.finish_skipped("Skipped");
    }
}
