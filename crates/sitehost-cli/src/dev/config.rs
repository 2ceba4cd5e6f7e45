//! Runtime configuration for the serve-reload lifecycle.
//!
//! Turns a loaded [`ServeConfig`] into absolute paths, a resolved socket
//! address and loaded TLS material. Everything that can fail before a socket
//! is opened fails here.

use crate::config::ServeConfig;
use crate::dev::builder::BuildRequest;
use crate::dev::tls::TlsConfig;
use crate::error::{ConfigError, Result};
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

/// Resolved settings for [`crate::dev::LifecycleController`].
#[derive(Debug, Clone)]
pub struct DevConfig {
    /// Address every session binds to
    pub addr: SocketAddr,
    /// Host as configured, used in printed URLs
    pub host: String,
    /// Build once before the first start
    pub build: bool,
    /// Absolute source/output paths and app name, reused on every reload
    pub build_request: BuildRequest,
    /// Loaded certificate and key; `None` serves plain HTTP
    pub tls: Option<TlsConfig>,
    /// Bounded wait for a stopping server
    pub shutdown_timeout: Duration,
    /// Bind attempts while reloading
    pub bind_retries: u32,
}

impl DevConfig {
    /// Resolve `config` against the launch directory `cwd`.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::CertificateNotFound`] / [`ConfigError::KeyNotFound`]
    ///   when TLS is enabled and a file is missing
    /// - [`BuildError::OverlappingPaths`](crate::error::BuildError) when the
    ///   source and output contain one another
    /// - [`ConfigError::UnresolvableHost`] when the host has no address
    /// - TLS loading errors for unreadable or mismatched PEM files
    pub fn from_config(config: &ServeConfig, cwd: &Path) -> Result<Self> {
        let build_request = BuildRequest::new(
            absolutize(cwd, &config.source),
            absolutize(cwd, &config.output),
            config.app_name.clone(),
        );
        build_request.check_layout()?;

        let tls = if config.tls {
            let cert = absolutize(cwd, &config.cert);
            let key = absolutize(cwd, &config.key);

            if !cert.is_file() {
                return Err(ConfigError::CertificateNotFound(cert).into());
            }
            if !key.is_file() {
                return Err(ConfigError::KeyNotFound(key).into());
            }

            tracing::debug!(cert = %cert.display(), key = %key.display(), "loading TLS material");
            Some(TlsConfig::from_pem_files(&cert, &key)?)
        } else {
            None
        };

        let addr = resolve_host(&config.host, config.port)?;
        tracing::debug!(host = %config.host, %addr, "host resolved");

        Ok(Self {
            addr,
            host: config.host.clone(),
            build: config.build,
            build_request,
            tls,
            shutdown_timeout: Duration::from_secs(config.shutdown_timeout_secs),
            bind_retries: config.bind_retries,
        })
    }

    /// Directory served at `/`.
    pub fn serving_root(&self) -> &Path {
        &self.build_request.output
    }
}

/// Join `path` onto `base` and normalize `.` and `..` without touching the
/// filesystem.
pub fn absolutize(base: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Resolve `host:port` once, preferring IPv4.
fn resolve_host(host: &str, port: u16) -> Result<SocketAddr> {
    let unresolvable = |reason: String| ConfigError::UnresolvableHost {
        host: host.to_string(),
        reason,
    };

    let addrs: Vec<SocketAddr> = (host, port)
        .to_socket_addrs()
        .map_err(|e| unresolvable(e.to_string()))?
        .collect();

    addrs
        .iter()
        .find(|addr| addr.is_ipv4())
        .or_else(|| addrs.first())
        .copied()
        .ok_or_else(|| unresolvable("no addresses returned".to_string()).into())
}
