//! HTTP backend.
//!
//! Saves POST the artifact bytes to `<post_url><name>.<extension>` and
//! loads GET them from `<get_url><name>.<extension>`.  Only those two
//! methods are used, so the endpoint needs no HEAD route.  A 404 on GET
//! is `VaultError::NotFound`; any other non-2xx status surfaces as
//! `VaultError::HttpResponse` carrying the status code and URL.

use std::fmt;
use std::time::Duration;

use tracing::debug;
use ureq::Agent;

use super::Storage;
use crate::errors::{Result, VaultError};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Stores artifacts on a remote HTTP endpoint.
#[derive(Clone)]
pub struct HttpStorage {
    get_url: String,
    post_url: String,
    agent: Agent,
}

impl HttpStorage {
    /// Use the same base URL for GET and POST.
    pub fn new(url: &str) -> Self {
        Self::with_urls(url, url, DEFAULT_TIMEOUT)
    }

    /// Use separate base URLs for loading (GET) and saving (POST).
    pub fn with_urls(get_url: &str, post_url: &str, timeout: Duration) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        Self {
            get_url: get_url.to_string(),
            post_url: post_url.to_string(),
            agent: config.into(),
        }
    }

    pub fn get_url(&self) -> &str {
        &self.get_url
    }

    pub fn post_url(&self) -> &str {
        &self.post_url
    }
}

impl fmt::Debug for HttpStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpStorage")
            .field("get_url", &self.get_url)
            .field("post_url", &self.post_url)
            .finish_non_exhaustive()
    }
}

impl Storage for HttpStorage {
    /// The key is the URL suffix; the base URL depends on the method.
    fn key_for(&self, name: &str, extension: &str) -> Result<String> {
        if extension.is_empty() {
            Ok(name.to_string())
        } else {
            Ok(format!("{name}.{extension}"))
        }
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let url = format!("{}{key}", self.post_url);
        let response = self
            .agent
            .post(&url)
            .header("Content-Type", "application/octet-stream")
            .send(bytes)
            .map_err(|e| map_error(e, &url))?;

        debug!(%url, status = response.status().as_u16(), bytes = bytes.len(), "artifact posted");
        Ok(())
    }

    fn read(&self, key: &str) -> Result<Vec<u8>> {
        let url = format!("{}{key}", self.get_url);
        let mut response = match self.agent.get(&url).call() {
            Ok(response) => response,
            Err(ureq::Error::StatusCode(404)) => return Err(VaultError::NotFound(url)),
            Err(e) => return Err(map_error(e, &url)),
        };
        let bytes = response
            .body_mut()
            .read_to_vec()
            .map_err(|e| map_error(e, &url))?;

        debug!(%url, bytes = bytes.len(), "artifact fetched");
        Ok(bytes)
    }

    /// Probed with GET; the body is discarded.
    fn exists(&self, key: &str) -> Result<bool> {
        match self.read(key) {
            Ok(_) => Ok(true),
            Err(VaultError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

fn map_error(err: ureq::Error, url: &str) -> VaultError {
    match err {
        ureq::Error::StatusCode(status) => VaultError::HttpResponse {
            status,
            url: url.to_string(),
        },
        other => VaultError::HttpTransport(format!("{url}: {other}")),
    }
}
