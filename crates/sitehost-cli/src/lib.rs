//! sitehost - serve a static site locally with rebuild-and-reload.
//!
//! The crate copies a site source tree into an output directory, serves that
//! directory over HTTP(S), and lets an operator rebuild and restart the
//! server from the terminal without restarting the process.
//!
//! # Architecture
//!
//! - [`error`] - Error types with actionable hints
//! - [`logger`] - Structured logging with tracing
//! - [`ui`] - Terminal status lines, spinner and serving banner
//! - [`config`] - Layered configuration (defaults, file, env, flags)
//! - [`dev`] - Site builder, server session and lifecycle controller
//! - [`commands`] - The serve command
//!
//! # Example
//!
//! ```rust,no_run
//! use sitehost_cli::dev::{build_site, BuildRequest};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let report = build_site(&BuildRequest::new("./site", "./bin", "Quizify"))?;
//!     println!("{:?}", report);
//!     Ok(())
//! }
//! ```

// Public modules
pub mod cli;
pub mod commands;
pub mod config;
pub mod dev;
pub mod error;
pub mod logger;
pub mod ui;

// Re-export commonly used types
pub use error::{BuildError, CliError, ConfigError, Result, ResultExt, ServerError};
