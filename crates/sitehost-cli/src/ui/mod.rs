//! Terminal UI utilities for status lines and formatted output.
//!
//! Operator-facing output goes to stderr through these helpers so it stays
//! separate from structured `tracing` logs. Two process-wide switches shape
//! everything printed here:
//!
//! - colors: off with `--no-color`, `NO_COLOR`, or when stderr isn't a terminal
//! - quiet: `--quiet` keeps [`error`] and drops every other status line
//!
//! # Examples
//!
//! ```no_run
//! use sitehost_cli::ui;
//!
//! ui::init_colors(false);
//! ui::set_quiet(false);
//!
//! let spinner = ui::Spinner::new("Copying site...");
//! spinner.finish("Site copied");
//!
//! ui::success("Server reloaded");
//! ui::warning("Source directory not found: ./site");
//! ```

mod format;
mod messages;
mod spinner;

pub use format::{format_duration, format_size, print_serving_banner};
pub use messages::{error, info, success, warning};
pub use spinner::Spinner;

use owo_colors::Style;
use std::sync::atomic::{AtomicBool, Ordering};

static COLORS: AtomicBool = AtomicBool::new(false);
static QUIET: AtomicBool = AtomicBool::new(false);

/// Check if color output should be enabled.
///
/// Respects NO_COLOR and FORCE_COLOR environment variables, falls back to
/// terminal capability detection.
pub fn should_use_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    console::user_attended_stderr()
}

/// Decide once whether status output is colored.
///
/// `disable` comes from `--no-color` and wins over `FORCE_COLOR`. The
/// decision covers both the owo-colors styling used here and the `console`
/// styling in the spinner template.
pub fn init_colors(disable: bool) {
    let enabled = !disable && should_use_color();
    COLORS.store(enabled, Ordering::Relaxed);
    console::set_colors_enabled_stderr(enabled);
}

/// Suppress everything but [`error`] lines.
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub fn colors_enabled() -> bool {
    COLORS.load(Ordering::Relaxed)
}

pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// `style` when colors are on, otherwise a plain style that emits no escapes.
pub(crate) fn paint(style: Style) -> Style {
    if colors_enabled() {
        style
    } else {
        Style::new()
    }
}
