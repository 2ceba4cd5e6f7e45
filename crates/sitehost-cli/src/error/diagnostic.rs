//! Miette diagnostic conversion for CLI errors.
//!
//! This module provides conversion from CLI errors to miette diagnostics
//! for readable error reporting at the process boundary.

use crate::error::{BuildError, CliError, ServerError};
use miette::Report;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Build(e) => build_error_to_miette(e),
        CliError::Server(e) => server_error_to_miette(e),
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        _ => miette::miette!("{}", err),
    }
}

/// Convert BuildError to miette Report
pub fn build_error_to_miette(err: BuildError) -> Report {
    match err {
        BuildError::CopyFailed { from, to, source } => {
            miette::miette!(
                "Failed to copy {} -> {}\nCause: {}\n\nHint: Check output directory permissions and free disk space",
                from.display(),
                to.display(),
                source
            )
        }
        _ => miette::miette!("{}", err),
    }
}

/// Convert ServerError to miette Report
pub fn server_error_to_miette(err: ServerError) -> Report {
    match err {
        ServerError::Bind { addr, source } if source.kind() == std::io::ErrorKind::AddrInUse => {
            miette::miette!(
                "Address {} is already in use\n\nHint: Stop the other server or pick another port with --port",
                addr
            )
        }
        ServerError::Bind { addr, source }
            if source.kind() == std::io::ErrorKind::PermissionDenied =>
        {
            miette::miette!(
                "Permission denied binding {}\n\nHint: Ports below 1024 usually require elevated privileges",
                addr
            )
        }
        _ => miette::miette!("{}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_addr_in_use_report() {
        let err = CliError::Server(ServerError::Bind {
            addr: "127.0.0.1:8000".parse().unwrap(),
            source: std::io::Error::new(std::io::ErrorKind::AddrInUse, "in use"),
        });
        let report = cli_error_to_miette(err);
        assert!(report.to_string().contains("already in use"));
    }

    #[test]
    fn test_generic_error_passthrough() {
        let report = cli_error_to_miette(CliError::Custom("boom".to_string()));
        assert_eq!(report.to_string(), "boom");
    }
}
