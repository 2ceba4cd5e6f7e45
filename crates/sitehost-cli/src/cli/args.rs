use clap::Args;
use std::path::PathBuf;

use crate::cli::validation::parse_app_name;
use crate::config::ConfigOverrides;

/// Server, build and TLS options
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// TLS certificate file (PEM) [default: cert.pem]
    #[arg(long, value_name = "FILE")]
    pub cert: Option<PathBuf>,

    /// TLS private key file (PEM) [default: key.pem]
    #[arg(long, value_name = "FILE")]
    pub key: Option<PathBuf>,

    /// Port to listen on [default: 8000]
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Host name or IP address to listen on [default: localhost]
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Build the site before serving
    ///
    /// Replaces the output directory with a fresh copy of the source tree,
    /// nested under the app name.
    #[arg(short, long)]
    pub build: bool,

    /// Site source directory [default: ./site]
    #[arg(long, value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Build output directory, also the serving root [default: ./bin]
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// URL path segment the site is mounted under [default: Quizify]
    #[arg(long, value_name = "NAME", value_parser = parse_app_name)]
    pub app_name: Option<String>,

    /// Serve plain HTTP; skips certificate and key checks
    #[arg(long)]
    pub no_tls: bool,

    /// Seconds to wait for the server to stop before forcing it closed [default: 5]
    #[arg(long, value_name = "SECS")]
    pub shutdown_timeout: Option<u64>,

    /// Bind attempts when restarting the server during a reload [default: 3]
    #[arg(long, value_name = "N")]
    pub bind_retries: Option<u32>,

    /// Config file [default: sitehost.config.json when present]
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the resolved configuration as JSON and exit
    #[arg(long)]
    pub print_config: bool,
}

impl ServeArgs {
    /// Settings given explicitly on the command line.
    ///
    /// Boolean switches only override when set, so `build: true` in a config
    /// file is not reset by a missing `--build`.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            cert: self.cert.clone(),
            key: self.key.clone(),
            port: self.port,
            host: self.host.clone(),
            build: self.build.then_some(true),
            source: self.source.clone(),
            output: self.output.clone(),
            app_name: self.app_name.clone(),
            tls: self.no_tls.then_some(false),
            shutdown_timeout_secs: self.shutdown_timeout,
            bind_retries: self.bind_retries,
        }
    }
}
