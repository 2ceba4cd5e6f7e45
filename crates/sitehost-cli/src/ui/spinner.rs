//! Spinner shown while the site is copied.

use super::{is_quiet, paint};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::{OwoColorize, Style};
use std::time::Duration;

/// Spinner for a copy of unknown length.
///
/// Only drawn on an attended terminal and never in quiet mode, so piped
/// output and logs stay free of redraw sequences.
pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        let pb = if Self::visible() {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["◐", "◓", "◑", "◒"]),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self { pb }
    }

    fn visible() -> bool {
        !is_quiet() && console::user_attended_stderr()
    }

    pub fn is_hidden(&self) -> bool {
        self.pb.is_hidden()
    }

    /// Stop with a check mark.
    pub fn finish(&self, message: &str) {
        self.pb.finish_with_message(format!(
            "{} {}",
            "✓".style(paint(Style::new().green())),
            message
        ));
    }

    /// Stop with a cross.
    pub fn fail(&self, message: &str) {
        self.pb.finish_with_message(format!(
            "{} {}",
            "✗".style(paint(Style::new().red())),
            message
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_spinner_hidden_in_quiet_mode() {
        crate::ui::set_quiet(true);
        let spinner = Spinner::new("Copying site...");
        assert!(spinner.is_hidden());
        spinner.finish("Site copied");
        crate::ui::set_quiet(false);
    }

    #[test]
    fn test_spinner_fail() {
        let spinner = Spinner::new("Copying site...");
        spinner.fail("Build failed");
    }
}
