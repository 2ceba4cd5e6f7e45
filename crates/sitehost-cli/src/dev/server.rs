//! Static file server session.
//!
//! A [`ServerSession`] owns one bound listener and the background worker that
//! accepts connections on it. The listener lives inside the worker task, so
//! the address is free again exactly when the worker has exited; callers that
//! want to rebind must await [`ServerSession::stop`] first.

use crate::dev::listing;
use crate::dev::tls::TlsConfig;
use crate::error::ServerError;
use axum::{
    handler::Handler,
    http::{header, HeaderValue},
    Router,
};
use hyper_util::{
    rt::{TokioExecutor, TokioIo},
    server::conn::auto,
    service::TowerToHyperService,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::{JoinError, JoinHandle, JoinSet};
use tokio_rustls::TlsAcceptor;
use tokio_util::sync::CancellationToken;
use tower_http::{services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer};

/// Pause after a failed `accept` so a persistent error (fd exhaustion) doesn't spin.
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(50);

/// Everything needed to start one session.
#[derive(Debug, Clone)]
pub struct ServeOptions {
    /// Address to bind
    pub addr: SocketAddr,
    /// Directory served at `/`
    pub root: PathBuf,
    /// Wrap connections with TLS when set
    pub tls: Option<TlsConfig>,
    /// How long [`ServerSession::stop`] waits before aborting the worker
    pub shutdown_timeout: Duration,
}

/// Listening state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Stopping,
    Stopped,
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// The worker left its accept loop on its own
    Graceful,
    /// The worker missed the shutdown deadline and was aborted
    Forced,
}

/// One live binding of an address to a serving worker.
///
/// Dropping a session signals the worker to stop but does not wait for it.
#[derive(Debug)]
pub struct ServerSession {
    local_addr: SocketAddr,
    tls: bool,
    shutdown: CancellationToken,
    worker: Option<JoinHandle<()>>,
    shutdown_timeout: Duration,
}

impl ServerSession {
    /// Bind `options.addr` and spawn the worker.
    ///
    /// The socket is bound before this returns, so bind failures surface
    /// here rather than inside the worker. There is no port hunting.
    ///
    /// # Errors
    ///
    /// [`ServerError::Bind`] if the address can't be bound.
    pub async fn start(options: ServeOptions) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(options.addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: options.addr,
                source,
            })?;
        let local_addr = listener.local_addr().map_err(|source| ServerError::Bind {
            addr: options.addr,
            source,
        })?;

        let shutdown = CancellationToken::new();
        let acceptor = options.tls.as_ref().map(TlsConfig::acceptor);
        let tls = acceptor.is_some();
        let app = router(options.root.clone());

        let worker = tokio::spawn(accept_loop(listener, app, acceptor, shutdown.clone()));

        tracing::info!(
            addr = %local_addr,
            root = %options.root.display(),
            tls,
            "server listening"
        );

        Ok(Self {
            local_addr,
            tls,
            shutdown,
            worker: Some(worker),
            shutdown_timeout: options.shutdown_timeout,
        })
    }

    /// Ask the worker to stop accepting. Idempotent and non-blocking.
    pub fn signal_stop(&self) {
        self.shutdown.cancel();
    }

    /// Stop the worker and wait for it to exit.
    ///
    /// Once this returns the listener is closed and the address can be bound
    /// again. If the worker doesn't exit within the shutdown timeout it is
    /// aborted and the abort is awaited before returning
    /// [`StopOutcome::Forced`].
    ///
    /// # Errors
    ///
    /// [`ServerError::Worker`] if the worker panicked.
    pub async fn stop(mut self) -> Result<StopOutcome, ServerError> {
        self.signal_stop();
        let Some(mut worker) = self.worker.take() else {
            return Ok(StopOutcome::Graceful);
        };

        match tokio::time::timeout(self.shutdown_timeout, &mut worker).await {
            Ok(Ok(())) => {
                tracing::debug!(addr = %self.local_addr, "server stopped");
                Ok(StopOutcome::Graceful)
            }
            Ok(Err(e)) => Err(worker_error(e)),
            Err(_) => {
                tracing::warn!(
                    addr = %self.local_addr,
                    timeout_ms = self.shutdown_timeout.as_millis() as u64,
                    "server did not stop in time, aborting"
                );
                worker.abort();
                match worker.await {
                    Ok(()) => Ok(StopOutcome::Forced),
                    Err(e) if e.is_cancelled() => Ok(StopOutcome::Forced),
                    Err(e) => Err(worker_error(e)),
                }
            }
        }
    }

    pub fn state(&self) -> SessionState {
        match &self.worker {
            Some(worker) if worker.is_finished() => SessionState::Stopped,
            Some(_) if self.shutdown.is_cancelled() => SessionState::Stopping,
            Some(_) => SessionState::Active,
            None => SessionState::Stopped,
        }
    }

    /// Address actually bound; differs from the requested one for port 0.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn scheme(&self) -> &'static str {
        if self.tls {
            "https"
        } else {
            "http"
        }
    }

    /// Browser URL of the site mounted at `/<app_name>/`.
    pub fn url(&self, host: &str, app_name: &str) -> String {
        let host = if host.contains(':') && !host.starts_with('[') {
            format!("[{}]", host)
        } else {
            host.to_string()
        };
        format!(
            "{}://{}:{}/{}/",
            self.scheme(),
            host,
            self.local_addr.port(),
            app_name
        )
    }
}

#[cfg(test)]
impl ServerSession {
    /// Session whose worker ignores cancellation, for exercising the forced stop.
    pub(crate) fn stalled(shutdown_timeout: Duration) -> Self {
        Self {
            local_addr: SocketAddr::from(([127, 0, 0, 1], 1)),
            tls: false,
            shutdown: CancellationToken::new(),
            worker: Some(tokio::spawn(std::future::pending::<()>())),
            shutdown_timeout,
        }
    }
}

impl Drop for ServerSession {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

fn worker_error(e: JoinError) -> ServerError {
    ServerError::Worker(e.to_string())
}

/// Static file router over `root`.
///
/// Directories serve their `index.html`, or a listing when there is none.
/// Every response is marked `no-cache` so a reload is visible immediately.
pub fn router(root: impl Into<PathBuf>) -> Router {
    let root = root.into();
    let files = ServeDir::new(&root)
        .append_index_html_on_directories(true)
        .fallback(listing::directory_listing.with_state(Arc::new(root)));

    Router::new()
        .fallback_service(files)
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache"),
        ))
        .layer(TraceLayer::new_for_http())
}

async fn accept_loop(
    listener: TcpListener,
    app: Router,
    tls: Option<TlsAcceptor>,
    shutdown: CancellationToken,
) {
    let mut connections = JoinSet::new();

    loop {
        tokio::select! {
            biased;

            _ = shutdown.cancelled() => break,

            Some(_) = connections.join_next(), if !connections.is_empty() => {}

            accepted = listener.accept() => match accepted {
                Ok((stream, peer)) => {
                    connections.spawn(serve_connection(stream, peer, app.clone(), tls.clone()));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "accept failed");
                    tokio::time::sleep(ACCEPT_ERROR_BACKOFF).await;
                }
            },
        }
    }

    drop(listener);
    // in-flight connections are abandoned
    connections.shutdown().await;
    tracing::debug!("server worker exited");
}

async fn serve_connection(
    stream: TcpStream,
    peer: SocketAddr,
    app: Router,
    tls: Option<TlsAcceptor>,
) {
    let service = TowerToHyperService::new(app);
    let builder = auto::Builder::new(TokioExecutor::new());

    let result = match tls {
        Some(acceptor) => match acceptor.accept(stream).await {
            Ok(stream) => builder.serve_connection(TokioIo::new(stream), service).await,
            Err(e) => {
                tracing::debug!(%peer, error = %e, "TLS handshake failed");
                return;
            }
        },
        None => builder.serve_connection(TokioIo::new(stream), service).await,
    };

    if let Err(e) = result {
        tracing::debug!(%peer, error = %e, "connection closed with error");
    }
}
