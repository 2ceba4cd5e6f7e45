//! Integration tests for serving and the reload lifecycle.
//!
//! Servers bind to 127.0.0.1 on an ephemeral port and are exercised with a
//! real HTTP client.

use sitehost_cli::config::ServeConfig;
use sitehost_cli::dev::{
    BuildRequest, DevConfig, LifecycleController, LifecycleState, ServeOptions, ServerSession,
    StopOutcome, TlsConfig,
};
use sitehost_cli::ServerError;
use std::fs;
use std::net::{SocketAddr, TcpListener};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::sync::mpsc;
use tokio::time::Duration;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .danger_accept_invalid_certs(true)
        .build()
        .unwrap()
}

fn write_site(project: &Path, index: &str) {
    let site = project.join("site");
    fs::create_dir_all(&site).unwrap();
    fs::write(site.join("index.html"), index).unwrap();
}

/// Plain HTTP config for a project directory, as the CLI would resolve it.
fn dev_config(project: &Path) -> DevConfig {
    let config = ServeConfig {
        host: "localhost".to_string(),
        port: 0,
        build: true,
        tls: false,
        ..ServeConfig::default()
    };
    DevConfig::from_config(&config, project).unwrap()
}

fn options(root: &Path, addr: SocketAddr) -> ServeOptions {
    ServeOptions {
        addr,
        root: root.to_path_buf(),
        tls: None,
        shutdown_timeout: Duration::from_secs(5),
    }
}

#[tokio::test]
async fn test_quizify_scenario() {
    let temp = TempDir::new().unwrap();
    write_site(temp.path(), "<h1>Quizify</h1>");

    let mut controller = LifecycleController::new(dev_config(temp.path()));
    controller.start().await.unwrap();

    let port = controller.local_addr().unwrap().port();
    assert_eq!(controller.url().unwrap(), format!("http://localhost:{}/Quizify/", port));

    let url = format!("http://127.0.0.1:{}/Quizify/index.html", port);
    let response = client().get(&url).send().await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.headers()["cache-control"], "no-cache");
    assert_eq!(response.text().await.unwrap(), "<h1>Quizify</h1>");

    controller.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_reload_command_serves_rebuilt_site() {
    let temp = TempDir::new().unwrap();
    write_site(temp.path(), "before");

    let mut controller = LifecycleController::new(dev_config(temp.path()));
    controller.start().await.unwrap();
    let addr = controller.local_addr().unwrap();
    let mut state = controller.subscribe();

    let (tx, rx) = mpsc::channel(4);
    let run = tokio::spawn(async move {
        controller.run(rx, std::future::pending()).await.unwrap();
        controller
    });

    write_site(temp.path(), "after");
    tx.send("r".to_string()).await.unwrap();

    // any change means the reload started; Running again means it finished
    state.changed().await.unwrap();
    state.wait_for(|s| *s == LifecycleState::Running).await.unwrap();

    let url = format!("http://{}/Quizify/", addr);
    let body = client().get(&url).send().await.unwrap().text().await.unwrap();
    assert_eq!(body, "after");

    tx.send("q".to_string()).await.unwrap();
    let controller = run.await.unwrap();
    assert_eq!(controller.state(), LifecycleState::Stopped);
}

#[tokio::test]
async fn test_quit_leaves_no_listening_socket() {
    let temp = TempDir::new().unwrap();
    write_site(temp.path(), "bye");

    let mut controller = LifecycleController::new(dev_config(temp.path()));
    controller.start().await.unwrap();
    let addr = controller.local_addr().unwrap();

    let (tx, rx) = mpsc::channel(1);
    tx.send("q".to_string()).await.unwrap();
    controller.run(rx, std::future::pending()).await.unwrap();

    assert!(client().get(format!("http://{}/", addr)).send().await.is_err());
    assert!(TcpListener::bind(addr).is_ok());
}

#[tokio::test]
async fn test_join_before_restart() {
    let temp = TempDir::new().unwrap();
    let first = ServerSession::start(options(temp.path(), "127.0.0.1:0".parse().unwrap()))
        .await
        .unwrap();
    let addr = first.local_addr();

    // skipping the join: the old worker still holds the listener
    first.signal_stop();
    let err = ServerSession::start(options(temp.path(), addr)).await.unwrap_err();
    assert!(matches!(
        err,
        ServerError::Bind { ref source, .. } if source.kind() == std::io::ErrorKind::AddrInUse
    ));

    // awaiting the stop frees the address
    assert_eq!(first.stop().await.unwrap(), StopOutcome::Graceful);
    let second = ServerSession::start(options(temp.path(), addr)).await.unwrap();
    second.stop().await.unwrap();
}

#[tokio::test]
async fn test_stopped_session_refuses_connections() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("index.html"), "root").unwrap();

    let session = ServerSession::start(options(temp.path(), "127.0.0.1:0".parse().unwrap()))
        .await
        .unwrap();
    let url = format!("http://{}/", session.local_addr());

    assert_eq!(client().get(&url).send().await.unwrap().text().await.unwrap(), "root");

    session.stop().await.unwrap();
    assert!(client().get(&url).send().await.is_err());
}

#[tokio::test]
async fn test_https_serving_with_fixture_certificate() {
    let temp = TempDir::new().unwrap();
    let app = temp.path().join("Quizify");
    fs::create_dir_all(&app).unwrap();
    fs::write(app.join("index.html"), "secure").unwrap();

    let tls = TlsConfig::from_pem_files(&fixture("cert.pem"), &fixture("key.pem")).unwrap();
    let session = ServerSession::start(ServeOptions {
        tls: Some(tls),
        ..options(temp.path(), "127.0.0.1:0".parse().unwrap())
    })
    .await
    .unwrap();
    assert_eq!(session.scheme(), "https");

    let url = session.url("127.0.0.1", "Quizify");
    assert!(url.starts_with("https://"));
    let response = client().get(&url).send().await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "secure");

    // plain HTTP against the TLS listener fails the handshake
    let plain = url.replacen("https://", "http://", 1);
    assert!(client().get(&plain).send().await.is_err());

    session.stop().await.unwrap();
}

#[tokio::test]
async fn test_reload_with_tls_keeps_serving_https() {
    let temp = TempDir::new().unwrap();
    write_site(temp.path(), "v1");

    let config = DevConfig {
        tls: Some(TlsConfig::from_pem_files(&fixture("cert.pem"), &fixture("key.pem")).unwrap()),
        ..dev_config(temp.path())
    };
    let mut controller = LifecycleController::new(config);
    controller.start().await.unwrap();

    write_site(temp.path(), "v2");
    controller.reload().await.unwrap();

    let url = controller.url().unwrap().replacen("localhost", "127.0.0.1", 1);
    assert!(url.starts_with("https://127.0.0.1:"));
    assert_eq!(client().get(&url).send().await.unwrap().text().await.unwrap(), "v2");

    controller.shutdown().await.unwrap();
}

#[test]
fn test_build_request_paths_are_absolute() {
    let temp = TempDir::new().unwrap();
    let config = dev_config(temp.path());

    let BuildRequest { source, output, app_name } = config.build_request;
    assert!(source.is_absolute());
    assert!(output.is_absolute());
    assert_eq!(app_name, "Quizify");
}
