//! TLS material loading for the HTTPS listener.
//!
//! Certificates and keys are read once at startup and shared by every
//! server session, so a reload never re-reads them from disk.

use crate::error::ServerError;
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use tokio_rustls::TlsAcceptor;

/// Parsed rustls server configuration.
#[derive(Clone)]
pub struct TlsConfig {
    server_config: Arc<rustls::ServerConfig>,
}

impl fmt::Debug for TlsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TlsConfig")
            .field("alpn", &self.server_config.alpn_protocols.len())
            .finish_non_exhaustive()
    }
}

impl TlsConfig {
    /// Load a PEM certificate chain and private key.
    ///
    /// The ring provider is selected explicitly so the result doesn't depend
    /// on which rustls crypto features other crates enable.
    ///
    /// # Errors
    ///
    /// - [`ServerError::InvalidTlsMaterial`] when a file can't be read or has
    ///   no usable PEM block
    /// - [`ServerError::Tls`] when rustls rejects the pair
    pub fn from_pem_files(cert: &Path, key: &Path) -> Result<Self, ServerError> {
        let certs = load_certs(cert)?;
        let key = load_key(key)?;

        let provider = Arc::new(rustls::crypto::ring::default_provider());
        let mut config = rustls::ServerConfig::builder_with_provider(provider)
            .with_safe_default_protocol_versions()?
            .with_no_client_auth()
            .with_single_cert(certs, key)?;
        config.alpn_protocols = vec![b"h2".to_vec(), b"http/1.1".to_vec()];

        Ok(Self {
            server_config: Arc::new(config),
        })
    }

    pub fn acceptor(&self) -> TlsAcceptor {
        TlsAcceptor::from(Arc::clone(&self.server_config))
    }
}

fn invalid(path: &Path, reason: impl Into<String>) -> ServerError {
    ServerError::InvalidTlsMaterial {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

fn open(path: &Path) -> Result<BufReader<File>, ServerError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| invalid(path, e.to_string()))
}

fn load_certs(path: &Path) -> Result<Vec<CertificateDer<'static>>, ServerError> {
    let mut reader = open(path)?;
    let certs = rustls_pemfile::certs(&mut reader)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| invalid(path, e.to_string()))?;

    if certs.is_empty() {
        return Err(invalid(path, "no CERTIFICATE block found"));
    }
    Ok(certs)
}

fn load_key(path: &Path) -> Result<PrivateKeyDer<'static>, ServerError> {
    let mut reader = open(path)?;
    rustls_pemfile::private_key(&mut reader)
        .map_err(|e| invalid(path, e.to_string()))?
        .ok_or_else(|| invalid(path, "no PRIVATE KEY block found"))
}
