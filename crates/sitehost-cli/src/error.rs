//! Error handling for the sitehost CLI.
//!
//! This module provides a hierarchical error type system using `thiserror` for
//! structured error handling with actionable messages. Each user-facing variant
//! carries a hint on how to resolve the problem.
//!
//! # Architecture
//!
//! - **Top-level errors** (`CliError`) represent broad categories of failures
//! - **Domain-specific errors** (`ConfigError`, `BuildError`, `ServerError`)
//!   provide detailed context
//! - **Error conversion** is automatic via `#[from]` attributes
//! - **Context helpers** allow attaching additional information to errors
//!
//! # Example
//!
//! ```rust,no_run
//! use sitehost_cli::error::{Result, ResultExt};
//! use std::path::PathBuf;
//!
//! fn launch_dir() -> Result<PathBuf> {
//!     std::env::current_dir().context("Cannot determine the current directory")
//! }
//! ```

mod diagnostic;

pub use diagnostic::cli_error_to_miette;

use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level CLI error type.
///
/// This is the primary error type returned by CLI commands. It automatically
/// converts from domain-specific errors via `From` implementations.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration-related errors (missing certificate, invalid values, etc.)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Site build errors (copy failures, unwritable output, etc.)
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// Server lifecycle errors (bind failures, TLS setup, worker crashes)
    #[error("Server error: {0}")]
    Server(#[from] ServerError),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with custom messages
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
///
/// These errors occur while loading settings and validating them before any
/// socket is opened.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Explicit config file doesn't exist
    #[error("Config file not found: {}\n\nHint: Create a sitehost.config.json file or drop the --config flag", .0.display())]
    NotFound(PathBuf),

    /// TLS certificate is missing
    #[error("Certificate not found: {}\n\nHint: Generate a self-signed pair with:\n  openssl req -x509 -newkey rsa:2048 -nodes -keyout key.pem -out cert.pem -days 365 -subj /CN=localhost\nor serve plain HTTP with --no-tls", .0.display())]
    CertificateNotFound(PathBuf),

    /// TLS private key is missing
    #[error("Key file not found: {}\n\nHint: Pass the private key matching your certificate with --key <path>", .0.display())]
    KeyNotFound(PathBuf),

    /// Host name could not be resolved to a socket address
    #[error("Cannot resolve host '{host}': {reason}\n\nHint: Use 'localhost' or an IP address such as 127.0.0.1")]
    UnresolvableHost {
        /// Host name as configured
        host: String,
        /// Resolver failure description
        reason: String,
    },

    /// Invalid value for a configuration option
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The invalid value
        value: String,
        /// Helpful hint for correct values
        hint: String,
    },
}

/// Site build errors.
///
/// A missing source directory is not an error; it is reported as a warning
/// by the builder instead.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Previous output could not be removed
    #[error("Failed to remove output directory {}: {source}\n\nHint: Check that no other process holds files open in it", .path.display())]
    RemoveOutput {
        /// Output directory being cleared
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// A file or directory could not be copied
    #[error("Failed to copy {} -> {}: {source}\n\nHint: Check output directory permissions and free disk space", .from.display(), .to.display())]
    CopyFailed {
        /// Source path
        from: PathBuf,
        /// Destination path
        to: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Source and output overlap, so removing one would destroy the other
    #[error("Source {} and output {} overlap\n\nHint: Build into a directory outside the source tree", .source_dir.display(), .output_dir.display())]
    OverlappingPaths {
        /// Site source tree
        source_dir: PathBuf,
        /// Output root
        output_dir: PathBuf,
    },

    /// Walking the source tree failed
    #[error("Failed to read source tree: {0}")]
    Walk(#[from] walkdir::Error),

    /// The blocking build task was cancelled or panicked
    #[error("Build task failed: {0}")]
    Task(String),
}

/// Server lifecycle errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The listening socket could not be bound
    #[error("Failed to bind to {addr}: {source}\n\nHint: Stop the process using this port or pick another with --port")]
    Bind {
        /// Address that was requested
        addr: SocketAddr,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Certificate or key material could not be loaded
    #[error("Invalid TLS material in {}: {reason}\n\nHint: Both files must be PEM encoded; the key may be PKCS#8, PKCS#1 or SEC1", .path.display())]
    InvalidTlsMaterial {
        /// File that failed to load
        path: PathBuf,
        /// What was wrong with it
        reason: String,
    },

    /// rustls rejected the certificate/key pair
    #[error("TLS configuration error: {0}\n\nHint: Check that the key matches the certificate")]
    Tls(#[from] rustls::Error),

    /// The worker task panicked
    #[error("Server worker failed: {0}")]
    Worker(String),
}

/// Result type alias using `CliError` as the default error type.
///
/// This simplifies function signatures throughout the CLI.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Prefix the error with a custom message.
    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}: {}", msg, err))
        })
    }
}
