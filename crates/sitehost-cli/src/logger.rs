//! Logging infrastructure for the sitehost CLI.
//!
//! This module provides a structured logging setup using the `tracing` ecosystem.
//! It supports multiple verbosity levels, colored output, and environment-based
//! configuration for debugging.
//!
//! # Features
//!
//! - **Verbosity control**: `--verbose` for debug, `--quiet` for errors only
//! - **Color support**: Automatic detection with `--no-color` override
//! - **Environment filters**: Override via `RUST_LOG` environment variable
//! - **Structured logging**: Use tracing spans for context
//!
//! # Example
//!
//! ```rust,no_run
//! use sitehost_cli::logger::init_logger;
//! use tracing::{info, debug, error};
//!
//! init_logger(false, false, false);
//!
//! info!("Starting server");
//! debug!("Serving root: {}", "bin");
//! ```

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const VERBOSE_FILTER: &str = "sitehost=debug,sitehost_cli=debug,tower_http=debug";
const QUIET_FILTER: &str = "sitehost=error,sitehost_cli=error";
const DEFAULT_FILTER: &str = "sitehost=info,sitehost_cli=info,tower_http=info";

/// Initialize the tracing subscriber with the specified options.
///
/// This function sets up structured logging for the CLI. It should be called
/// once at the start of the program, before any logging occurs.
///
/// # Arguments
///
/// * `verbose` - Enable debug-level logging (overrides `quiet`)
/// * `quiet` - Only show error-level logs
/// * `no_color` - Disable colored output
///
/// # Verbosity Levels
///
/// The logging level is determined in this order:
/// 1. `--verbose` flag: DEBUG for sitehost plus per-request traces
/// 2. `--quiet` flag: Sets level to ERROR only
/// 3. `RUST_LOG` environment variable: Custom filter
/// 4. Default: INFO level for sitehost
///
/// # Examples
///
/// ```rust,no_run
/// use sitehost_cli::logger::init_logger;
///
/// // Default logging (INFO level)
/// init_logger(false, false, false);
///
/// // Debug logging
/// init_logger(true, false, false);
///
/// // Quiet mode (errors only)
/// init_logger(false, true, false);
///
/// // No colors (for CI/piped output)
/// init_logger(false, false, true);
/// ```
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    // Determine the filter level based on flags and environment
    let filter = if verbose {
        // Verbose mode: debug for our crate, request traces from tower-http
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };

    init_logger_with_filter(filter, no_color);
}

/// Initialize logger with custom environment filter.
///
/// This is useful for testing or advanced scenarios where you need precise
/// control over log filtering.
///
/// # Example
///
/// ```rust,no_run
/// use sitehost_cli::logger::init_logger_with_filter;
/// use tracing_subscriber::EnvFilter;
///
/// let filter = EnvFilter::new("sitehost_cli=trace,hyper=off");
/// init_logger_with_filter(filter, false);
/// ```
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
