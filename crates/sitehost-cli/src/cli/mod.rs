//! Command-line interface definition for sitehost.
//!
//! This module defines the CLI structure using clap v4's derive macros.
//! Every server option is optional on the command line so that values from
//! `sitehost.config.json` and `SITEHOST_*` environment variables survive
//! when a flag is omitted; defaults live in [`crate::config`].

mod args;
mod tests;
mod validation;

use clap::Parser;

pub use args::ServeArgs;
pub use validation::parse_app_name;

/// sitehost - serve a static site locally with rebuild-and-reload
#[derive(Parser, Debug)]
#[command(
    name = "sitehost",
    version,
    about = "Serve a static site over HTTPS with interactive rebuild and reload",
    long_about = "sitehost copies a site source tree into an output directory and serves it\n\
                  over HTTPS. Type 'r' + Enter to rebuild and restart the server, 'q' + Enter\n\
                  to quit. The terminal session is kept across reloads."
)]
pub struct Cli {
    /// Enable verbose logging (debug level, one line per request)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    ///
    /// Outputs plain text without ANSI color codes. Useful for logging to
    /// files or systems that don't support colored terminal output.
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(flatten)]
    pub serve: ServeArgs,
}
