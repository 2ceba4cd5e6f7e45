//! sitehost - local HTTPS file server with interactive rebuild and reload.
//!
//! This is the main entry point. It handles command-line argument parsing,
//! logging initialization, and hands off to the serve command.

use clap::Parser;
use miette::Result;
use sitehost_cli::{cli, commands, error, logger, ui};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = cli::Cli::parse();

    // Initialize logging and colors based on global flags
    ui::init_colors(args.no_color);
    ui::set_quiet(args.quiet);
    let no_color = !ui::colors_enabled();
    logger::init_logger(args.verbose, args.quiet, no_color);
    if no_color {
        // fails only when a hook is already installed
        let _ = miette::set_hook(Box::new(|_| {
            Box::new(miette::MietteHandlerOpts::new().color(false).build())
        }));
    }

    let result = commands::serve_execute(args.serve).await;

    // Convert CLI errors to miette diagnostics for readable error reporting
    result.map_err(error::cli_error_to_miette)
}
