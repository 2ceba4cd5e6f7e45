//! Build report formatting and the serving banner.

use super::{is_quiet, paint};
use console::Term;
use owo_colors::{OwoColorize, Style};
use std::path::Path;
use std::time::Duration;

const SIZE_UNITS: [&str; 4] = ["KiB", "MiB", "GiB", "TiB"];

/// Byte count in binary units with one decimal, `B` below 1 KiB.
///
/// ```
/// use sitehost_cli::ui::format_size;
///
/// assert_eq!(format_size(512), "512 B");
/// assert_eq!(format_size(1536), "1.5 KiB");
/// ```
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }

    let mut value = bytes as f64 / 1024.0;
    let mut unit = SIZE_UNITS[0];
    for next in &SIZE_UNITS[1..] {
        if value < 1024.0 {
            break;
        }
        value /= 1024.0;
        unit = next;
    }
    format!("{value:.1} {unit}")
}

/// Build time: milliseconds under a second, then seconds, then `Xm YYs`.
pub fn format_duration(duration: Duration) -> String {
    match duration.as_millis() {
        ms @ 0..=999 => format!("{ms}ms"),
        1_000..=59_999 => format!("{:.1}s", duration.as_secs_f64()),
        _ => {
            let secs = duration.as_secs();
            format!("{}m {:02}s", secs / 60, secs % 60)
        }
    }
}

fn banner_lines(url: &str, root: &Path, width: usize) -> Vec<String> {
    let bold = paint(Style::new().bold());
    let dim = paint(Style::new().dimmed());
    let key = paint(Style::new().cyan().bold());

    vec![
        String::new(),
        format!(
            "  {} {}",
            "Serving at".style(bold),
            url.style(paint(Style::new().bright_white().bold().underline()))
        ),
        format!("  {} {}", "Directory ".style(dim), root.display().style(dim)),
        "─".repeat(width.min(60)),
        format!("  {}", "Commands (enter to confirm):".style(bold)),
        format!("    {}  rebuild and reload", "r".style(key)),
        format!("    {}  quit", "q".style(key)),
        format!("  {}", "Press Ctrl+C to stop".style(dim)),
        String::new(),
    ]
}

/// Print the "server is up" banner with the operator command list.
///
/// Nothing is printed in quiet mode.
pub fn print_serving_banner(url: &str, root: &Path) {
    if is_quiet() {
        return;
    }
    let width = Term::stderr().size().1 as usize;
    for line in banner_lines(url, root, width) {
        eprintln!("{line}");
    }
}
