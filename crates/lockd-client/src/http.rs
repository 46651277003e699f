//! HTTP client for the lockd server
//!
//! Wraps the three wire operations (acquire, release, list) and maps
//! status codes to the typed [`ClientError`] variants.

use std::time::Duration;

use lockd_common::{
    DEFAULT_CONNECT_TIMEOUT_MS, DEFAULT_READ_TIMEOUT_MS, DEFAULT_SERVER_PORT, PARAM_NAME,
    PARAM_OWNER, PARAM_TIMEOUT,
};
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::error::{ClientError, Result};

/// Configuration for the HTTP client
#[derive(Clone, Debug)]
pub struct HttpClientConfig {
    /// Base URL of the lock server (e.g. "http://127.0.0.1:8420")
    pub server_url: String,
    /// Connection timeout in milliseconds
    pub connect_timeout_ms: u64,
    /// Read timeout in milliseconds
    pub read_timeout_ms: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            server_url: format!("http://127.0.0.1:{}", DEFAULT_SERVER_PORT),
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
        }
    }
}

impl HttpClientConfig {
    /// Create a new config pointing at a server URL
    pub fn new(server_url: &str) -> Self {
        Self {
            server_url: server_url.to_string(),
            ..Default::default()
        }
    }

    /// Set timeouts
    pub fn with_timeouts(mut self, connect_ms: u64, read_ms: u64) -> Self {
        self.connect_timeout_ms = connect_ms;
        self.read_timeout_ms = read_ms;
        self
    }
}

/// HTTP client for the lock server
pub struct LockdHttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl LockdHttpClient {
    /// Create a new HTTP client
    pub fn new(config: HttpClientConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_millis(config.read_timeout_ms))
            .build()?;

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.server_url.trim_end_matches('/'), path)
    }

    /// Acquire or renew `name` for `owner` with the given lease duration.
    pub async fn acquire(&self, name: &str, owner: &str, lease: Duration) -> Result<()> {
        debug!(name, owner, "acquiring lock");

        let timeout = lease.as_secs().to_string();
        let resp = self
            .client
            .get(self.url("/acquire-lock"))
            .query(&[
                (PARAM_NAME, name),
                (PARAM_OWNER, owner),
                (PARAM_TIMEOUT, timeout.as_str()),
            ])
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        match status {
            StatusCode::OK => Ok(()),
            StatusCode::CONFLICT => Err(ClientError::AlreadyLocked(body)),
            StatusCode::BAD_REQUEST => Err(ClientError::BadRequest(body)),
            _ => Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            }),
        }
    }

    /// Release `name` held by `owner`.
    pub async fn release(&self, name: &str, owner: &str) -> Result<()> {
        debug!(name, owner, "releasing lock");

        let resp = self
            .client
            .get(self.url("/release-lock"))
            .query(&[(PARAM_NAME, name), (PARAM_OWNER, owner)])
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        match status {
            StatusCode::OK => Ok(()),
            StatusCode::BAD_REQUEST => Err(classify_release_rejection(body)),
            _ => Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            }),
        }
    }

    /// Fetch the newline-delimited listing of active locks.
    pub async fn list(&self) -> Result<String> {
        let resp = self.client.get(self.url("/")).send().await?;

        let status = resp.status();
        let body = resp.text().await?;
        match status {
            StatusCode::OK => Ok(body),
            _ => Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            }),
        }
    }
}

/// A release 400 is either a validation failure or the wrong-owner
/// refusal; the wire carries the distinction only in the body text.
fn classify_release_rejection(body: String) -> ClientError {
    if body.starts_with("lock has another owner") {
        ClientError::WrongOwner(body)
    } else {
        ClientError::BadRequest(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = HttpClientConfig::default();
        assert_eq!(config.server_url, "http://127.0.0.1:8420");
        assert_eq!(config.connect_timeout_ms, 5000);
        assert_eq!(config.read_timeout_ms, 30000);
    }

    #[test]
    fn test_config_builders() {
        let config = HttpClientConfig::new("http://lockd.internal:9000").with_timeouts(100, 200);
        assert_eq!(config.server_url, "http://lockd.internal:9000");
        assert_eq!(config.connect_timeout_ms, 100);
        assert_eq!(config.read_timeout_ms, 200);
    }

    #[test]
    fn test_classify_release_rejection() {
        assert!(matches!(
            classify_release_rejection("lock has another owner \"hostA:100\"".to_string()),
            ClientError::WrongOwner(_)
        ));
        assert!(matches!(
            classify_release_rejection("lock owner is required".to_string()),
            ClientError::BadRequest(_)
        ));
    }

    #[test]
    fn test_url_joining_strips_trailing_slash() {
        let client = LockdHttpClient::new(HttpClientConfig::new("http://localhost:8420/")).unwrap();
        assert_eq!(client.url("/acquire-lock"), "http://localhost:8420/acquire-lock");
        assert_eq!(client.url("/"), "http://localhost:8420/");
    }
}
