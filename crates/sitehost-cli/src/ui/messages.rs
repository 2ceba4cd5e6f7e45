//! One-line status messages on stderr.
//!
//! Every line is a symbol followed by the message. Only [`error`] survives
//! `--quiet`.

use super::{is_quiet, paint};
use owo_colors::{OwoColorize, Style};

/// Render a status line without printing it.
fn status_line(symbol: &str, symbol_style: Style, message: &str, message_style: Style) -> String {
    format!(
        "{} {}",
        symbol.style(paint(symbol_style)),
        message.style(paint(message_style))
    )
}

fn emit(line: String) {
    if !is_quiet() {
        eprintln!("{line}");
    }
}

/// A step finished, e.g. `Built site: site -> bin/Quizify`.
pub fn success(message: &str) {
    emit(status_line("✓", Style::new().green().bold(), message, Style::new()));
}

/// Lifecycle progress such as `Reloading...`.
pub fn info(message: &str) {
    emit(status_line("ℹ", Style::new().blue().bold(), message, Style::new()));
}

/// Recoverable problems: missing source, plain HTTP, forced shutdown.
pub fn warning(message: &str) {
    emit(status_line(
        "⚠",
        Style::new().yellow().bold(),
        message,
        Style::new().yellow(),
    ));
}

/// Printed even in quiet mode.
///
/// ```no_run
/// sitehost_cli::ui::error("Reload failed: address already in use");
/// ```
pub fn error(message: &str) {
    eprintln!(
        "{}",
        status_line("✗", Style::new().red().bold(), message, Style::new().red())
    );
}
