//! Local serving with interactive rebuild and reload.
//!
//! - [`builder`] copies the site source into the output directory
//! - [`server`] serves the output directory from one background worker
//! - [`lifecycle`] drives stop/rebuild/start cycles from operator commands
//! - [`console`] reads those commands from stdin

pub mod builder;
pub mod config;
pub mod console;
pub mod lifecycle;
pub mod listing;
pub mod server;
pub mod tls;

// Re-exports
pub use builder::{build_site, BuildReport, BuildRequest, SiteBuilder};
pub use config::DevConfig;
pub use console::{spawn_stdin_reader, Command};
pub use lifecycle::{LifecycleController, LifecycleState};
pub use server::{router, ServeOptions, ServerSession, SessionState, StopOutcome};
pub use tls::TlsConfig;
