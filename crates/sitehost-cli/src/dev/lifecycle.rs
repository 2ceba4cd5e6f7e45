//! Serve-reload lifecycle controller.
//!
//! The controller owns the single live [`ServerSession`] and reacts to one
//! operator line at a time. A reload is always stop (awaited), rebuild,
//! start, so two sessions never listen on the same address and no command
//! is read while a transition is in flight.
//!
//! ```text
//! INIT --start--> RUNNING --r--> RELOADING --> RUNNING
//!                    |
//!                    +--q / interrupt / end of input--> STOPPED
//! ```

use crate::dev::builder::SiteBuilder;
use crate::dev::config::DevConfig;
use crate::dev::console::Command;
use crate::dev::server::{ServeOptions, ServerSession, StopOutcome};
use crate::error::{CliError, Result, ServerError};
use crate::ui;
use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::sync::{mpsc, watch};

/// Fixed pause between bind attempts during a reload.
pub const BIND_RETRY_BACKOFF: Duration = Duration::from_millis(250);

/// Controller state, observable through [`LifecycleController::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Init,
    Running,
    Reloading,
    Stopped,
}

pub struct LifecycleController {
    config: DevConfig,
    builder: SiteBuilder,
    session: Option<ServerSession>,
    /// Bind address; pinned to the first bound port so reloads keep the URL
    addr: SocketAddr,
    state: watch::Sender<LifecycleState>,
}

impl LifecycleController {
    pub fn new(config: DevConfig) -> Self {
        let (state, _) = watch::channel(LifecycleState::Init);
        Self {
            builder: SiteBuilder::new(config.build_request.clone()),
            addr: config.addr,
            session: None,
            state,
            config,
        }
    }

    pub fn state(&self) -> LifecycleState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<LifecycleState> {
        self.state.subscribe()
    }

    /// Bound address of the live session.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.session.as_ref().map(ServerSession::local_addr)
    }

    /// Browser URL of the live session.
    pub fn url(&self) -> Option<String> {
        self.session
            .as_ref()
            .map(|s| s.url(&self.config.host, &self.config.build_request.app_name))
    }

    /// INIT -> RUNNING: build if requested, then start the first session.
    ///
    /// The first bind is not retried.
    pub async fn start(&mut self) -> Result<()> {
        self.expect_state(LifecycleState::Init, "start")?;

        if self.config.build {
            self.builder.build().await?;
        }

        let session = ServerSession::start(self.serve_options()).await?;
        self.addr = session.local_addr();

        let url = session.url(&self.config.host, &self.config.build_request.app_name);
        ui::print_serving_banner(&url, self.config.serving_root());

        self.session = Some(session);
        self.set_state(LifecycleState::Running);
        Ok(())
    }

    /// RUNNING -> RELOADING -> RUNNING: stop and join, rebuild, restart on
    /// the same address.
    ///
    /// Any failure leaves the controller in RELOADING with no live session;
    /// the caller is expected to shut down.
    pub async fn reload(&mut self) -> Result<()> {
        self.expect_state(LifecycleState::Running, "reload")?;
        self.set_state(LifecycleState::Reloading);
        ui::info("Reloading...");

        self.stop_session().await?;
        self.builder.build().await?;

        let session = self.start_with_retries().await?;
        ui::success(&format!(
            "Server reloaded at: {}",
            session.url(&self.config.host, &self.config.build_request.app_name)
        ));

        self.session = Some(session);
        self.set_state(LifecycleState::Running);
        Ok(())
    }

    /// Stop the live session, if any, and enter STOPPED. Idempotent.
    pub async fn shutdown(&mut self) -> Result<()> {
        if self.state() == LifecycleState::Stopped {
            return Ok(());
        }

        let result = self.stop_session().await;
        self.set_state(LifecycleState::Stopped);
        if result.is_ok() {
            ui::success("Server stopped");
        }
        result
    }

    /// Command loop.
    ///
    /// Reads one line at a time from `lines` until `q`, end of input or
    /// `interrupt` resolves, then shuts down. Starts the server first when
    /// still in INIT. A failed reload shuts down and returns the error.
    ///
    /// `interrupt` is not polled while a reload is in flight: the copy runs
    /// on the blocking pool and can't be abandoned halfway. An interrupt that
    /// fires during a reload takes effect as soon as it finishes, ahead of
    /// any queued lines.
    pub async fn run<F>(&mut self, mut lines: mpsc::Receiver<String>, interrupt: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        if self.state() == LifecycleState::Init {
            self.start().await?;
        }

        tokio::pin!(interrupt);

        loop {
            let line = tokio::select! {
                biased;
                _ = &mut interrupt => {
                    ui::info("Interrupted");
                    break;
                }
                line = lines.recv() => line,
            };

            let Some(line) = line else {
                tracing::debug!("end of input");
                break;
            };

            match Command::parse(&line) {
                Some(Command::Reload) => {
                    if let Err(e) = self.reload().await {
                        ui::error(&format!("Reload failed: {}", e));
                        if let Err(stop_err) = self.shutdown().await {
                            tracing::warn!(error = %stop_err, "shutdown after failed reload");
                        }
                        return Err(e);
                    }
                }
                Some(Command::Quit) => break,
                None => tracing::debug!(line = %line.trim(), "ignoring input"),
            }
        }

        self.shutdown().await
    }

    fn serve_options(&self) -> ServeOptions {
        ServeOptions {
            addr: self.addr,
            root: self.config.serving_root().to_path_buf(),
            tls: self.config.tls.clone(),
            shutdown_timeout: self.config.shutdown_timeout,
        }
    }

    async fn start_with_retries(&self) -> Result<ServerSession, ServerError> {
        let attempts = self.config.bind_retries.max(1);
        let mut attempt = 1;

        loop {
            match ServerSession::start(self.serve_options()).await {
                Ok(session) => return Ok(session),
                Err(ServerError::Bind { addr, source }) if attempt < attempts => {
                    tracing::warn!(%addr, attempt, attempts, error = %source, "bind failed, retrying");
                    tokio::time::sleep(BIND_RETRY_BACKOFF).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn stop_session(&mut self) -> Result<()> {
        let Some(session) = self.session.take() else {
            return Ok(());
        };

        ui::info("Stopping server...");
        if session.stop().await? == StopOutcome::Forced {
            ui::warning("Server did not stop in time; open connections were closed");
        }
        Ok(())
    }

    fn expect_state(&self, expected: LifecycleState, action: &str) -> Result<()> {
        let current = self.state();
        if current != expected {
            return Err(CliError::Custom(format!(
                "Cannot {} while {:?}",
                action, current
            )));
        }
        Ok(())
    }

    fn set_state(&self, state: LifecycleState) {
        let previous = self.state.send_replace(state);
        tracing::debug!(from = ?previous, to = ?state, "lifecycle transition");
    }
}
