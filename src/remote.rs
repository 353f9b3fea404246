//! HTTP client for the remote well store.
//!
//! The remote store is the authority for durable well records. It is only
//! reachable while online; every failure here is transient and recoverable
//! by the caller (fall back to local data, or leave the record provisional
//! for a later retry).

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::models::{Well, WellInput};

/// Timeout for the reachability probe.
const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Errors that can occur talking to the remote well store.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("server returned status {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("failed to decode server response: {0}")]
    Decode(String),
}

/// The remote well store interface.
///
/// `create` returns the server-confirmed record carrying a durable identity.
#[allow(async_fn_in_trait)]
pub trait RemoteWellStore {
    async fn list(&self) -> Result<Vec<Well>, RemoteError>;
    async fn create(&self, input: &WellInput) -> Result<Well, RemoteError>;
}

/// Error body shape returned by the well API.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    detail: String,
}

/// Remote well store client over HTTP.
#[derive(Debug, Clone)]
pub struct HttpWellStore {
    base_url: String,
    client: reqwest::Client,
}

impl HttpWellStore {
    pub fn new(server_url: &str) -> Self {
        Self {
            base_url: normalize_base_url(server_url),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn wells_url(&self) -> String {
        format!("{}/api/wells/", self.base_url)
    }
}

impl RemoteWellStore for HttpWellStore {
    async fn list(&self) -> Result<Vec<Well>, RemoteError> {
        let response = self
            .client
            .get(self.wells_url())
            .send()
            .await
            .map_err(|e| RemoteError::Connection(e.to_string()))?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))
    }

    async fn create(&self, input: &WellInput) -> Result<Well, RemoteError> {
        let response = self
            .client
            .post(self.wells_url())
            .json(input)
            .send()
            .await
            .map_err(|e| RemoteError::Connection(e.to_string()))?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))
    }
}

/// Maps a non-success response to a status error, preferring the server's
/// `detail` message when the body parses.
async fn status_error(response: reqwest::Response) -> RemoteError {
    let status = response.status().as_u16();
    let detail = match response.json::<ApiErrorBody>().await {
        Ok(body) => body.detail,
        Err(_) => format!("HTTP error {}", status),
    };
    RemoteError::Status { status, detail }
}

/// Checks whether the well API is reachable.
///
/// Used as a fast pre-flight before load and sync attempts; any error or
/// timeout counts as unreachable.
pub async fn check_server(server_url: &str) -> bool {
    let url = format!("{}/api/wells/", normalize_base_url(server_url));
    let client = match reqwest::Client::builder().timeout(PROBE_TIMEOUT).build() {
        Ok(c) => c,
        Err(_) => return false,
    };

    match client.get(&url).send().await {
        Ok(response) => response.status().is_success(),
        Err(_) => false,
    }
}

/// Normalizes a configured server URL to an `http(s)://host` base without a
/// trailing slash.
fn normalize_base_url(server_url: &str) -> String {
    let with_scheme = if server_url.starts_with("http://") || server_url.starts_with("https://") {
        server_url.to_string()
    } else {
        format!("http://{}", server_url)
    };
    with_scheme.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url("http://localhost:8000"),
            "http://localhost:8000"
        );
        assert_eq!(
            normalize_base_url("https://wells.example.com/"),
            "https://wells.example.com"
        );
        assert_eq!(
            normalize_base_url("localhost:8000"),
            "http://localhost:8000"
        );
    }

    #[test]
    fn test_wells_url() {
        let store = HttpWellStore::new("localhost:8000");
        assert_eq!(store.wells_url(), "http://localhost:8000/api/wells/");
    }
}
