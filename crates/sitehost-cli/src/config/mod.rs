//! Configuration system for sitehost with multi-source loading.
//!
//! Merges settings from CLI args, environment variables, and config files.
//! Priority: CLI > Environment > File > Defaults

mod defaults;
mod loading;
mod validation;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use defaults::*;
pub use loading::{ConfigOverrides, CONFIG_FILE_NAME, ENV_PREFIX};
pub use validation::*;

/// Server configuration - loaded from sitehost.config.json, env, or CLI args.
///
/// Paths are kept exactly as configured; they are resolved against the
/// launch directory by [`crate::dev::DevConfig::from_config`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServeConfig {
    /// TLS certificate (PEM)
    #[serde(default = "default_cert")]
    pub cert: PathBuf,

    /// TLS private key (PEM)
    #[serde(default = "default_key")]
    pub key: PathBuf,

    /// Listen port; 0 picks an ephemeral port once and keeps it across reloads
    #[serde(default = "default_port")]
    pub port: u16,

    /// Listen host name or IP address
    #[serde(default = "default_host")]
    pub host: String,

    /// Build the site before serving
    #[serde(default)]
    pub build: bool,

    /// Site source tree
    #[serde(default = "default_source")]
    pub source: PathBuf,

    /// Build output root, also the serving root
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// URL path segment the built site is mounted under
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Wrap the listener with TLS
    #[serde(default = "default_tls")]
    pub tls: bool,

    /// Seconds to wait for the server worker before forcing it closed
    #[serde(default = "default_shutdown_timeout_secs")]
    pub shutdown_timeout_secs: u64,

    /// Bind attempts when restarting during a reload
    #[serde(default = "default_bind_retries")]
    pub bind_retries: u32,
}

impl ServeConfig {
    /// Field names, also the accepted `SITEHOST_*` environment suffixes.
    pub const FIELDS: &'static [&'static str] = &[
        "cert",
        "key",
        "port",
        "host",
        "build",
        "source",
        "output",
        "app_name",
        "tls",
        "shutdown_timeout_secs",
        "bind_retries",
    ];

    /// Pretty JSON rendering used by `--print-config`.
    pub fn to_pretty_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            cert: default_cert(),
            key: default_key(),
            port: default_port(),
            host: default_host(),
            build: false,
            source: default_source(),
            output: default_output(),
            app_name: default_app_name(),
            tls: default_tls(),
            shutdown_timeout_secs: default_shutdown_timeout_secs(),
            bind_retries: default_bind_retries(),
        }
    }
}
