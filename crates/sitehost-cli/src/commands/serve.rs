//! Serve command implementation.
//!
//! Orchestrates the whole session:
//! - Load and validate configuration (defaults, file, env, flags)
//! - Check TLS material and resolve the listen address
//! - Optional initial build, then the first server start
//! - Command loop on stdin until `q`, Ctrl+C or end of input

use crate::cli::ServeArgs;
use crate::config::ServeConfig;
use crate::dev::{spawn_stdin_reader, DevConfig, LifecycleController};
use crate::error::{Result, ResultExt};
use std::path::Path;

/// Execute the serve command.
///
/// Relative paths in the configuration are resolved against the current
/// directory once, here; nothing later depends on the process working
/// directory.
///
/// # Errors
///
/// Returns errors for:
/// - Invalid configuration, missing certificate or key
/// - Build failures during startup or reload
/// - Bind failures (startup, or reload once retries are exhausted)
pub async fn execute(args: ServeArgs) -> Result<()> {
    let cwd = std::env::current_dir().context("Cannot determine the current directory")?;
    run_in(args, &cwd).await
}

async fn run_in(args: ServeArgs, cwd: &Path) -> Result<()> {
    let config = ServeConfig::load(&args.overrides(), args.config.as_deref(), cwd)?;
    config.validate()?;

    if args.print_config {
        println!("{}", config.to_pretty_json()?);
        return Ok(());
    }

    tracing::debug!(cwd = %cwd.display(), "resolving paths");
    let dev_config = DevConfig::from_config(&config, cwd)?;
    if dev_config.tls.is_none() {
        crate::ui::warning("TLS disabled, serving plain HTTP");
    }

    let mut controller = LifecycleController::new(dev_config);
    controller.start().await?;

    controller.run(spawn_stdin_reader(), interrupted()).await
}

/// Resolves on Ctrl+C. If the handler can't be installed, never resolves.
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Ctrl+C handler unavailable");
        std::future::pending::<()>().await;
    }
}
