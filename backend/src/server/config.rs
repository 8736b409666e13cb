//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::path::Path;

use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) workers: Option<usize>,
    pub(crate) token_secret: Zeroizing<Vec<u8>>,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Construct a server configuration from the bind address and the
    /// token signing secret.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, token_secret: Zeroizing<Vec<u8>>) -> Self {
        Self {
            bind_addr,
            workers: None,
            token_secret,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Pin the worker count instead of deferring to the Actix default.
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}

/// Read the token signing secret from a file, refusing empty files.
///
/// The contents are used verbatim as HMAC key material, so surrounding
/// whitespace is preserved rather than trimmed.
///
/// # Errors
/// Returns [`std::io::Error`] when the file cannot be read or is empty.
pub fn load_token_secret(path: &Path) -> std::io::Result<Zeroizing<Vec<u8>>> {
    let bytes = std::fs::read(path)?;
    if bytes.is_empty() {
        return Err(std::io::Error::other(format!(
            "token secret file {} is empty",
            path.display()
        )));
    }
    Ok(Zeroizing::new(bytes))
}

/// Short SHA-256 fingerprint of the secret, safe to log for matching the
/// deployed key against a key inventory.
#[must_use]
pub fn secret_fingerprint(secret: &[u8]) -> String {
    let digest = Sha256::digest(secret);
    hex::encode(&digest.as_slice()[..8])
}
