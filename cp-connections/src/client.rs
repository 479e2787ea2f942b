//! HTTP client for results pages.

use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;

use crate::query::{ConnectionQuery, DEFAULT_BASE_URL, QueryError};

/// Errors from fetching a results page.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Site returned a non-success status
    #[error("site returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// The query could not be turned into a URL
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Client configuration is unusable
    #[error("invalid client configuration: {0}")]
    Config(String),
}

/// Configuration for the results page client.
#[derive(Debug, Clone)]
pub struct CpConfig {
    /// Site root, e.g. `http://www.cp.sk`
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Value of the User-Agent header
    pub user_agent: String,
}

impl CpConfig {
    /// Configuration pointing at the public site.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            user_agent: concat!("cp-connections/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Set a custom base URL (for testing or mirrors).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }
}

impl Default for CpConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client that downloads results pages.
#[derive(Debug, Clone)]
pub struct CpClient {
    http: reqwest::Client,
    base_url: String,
}

impl CpClient {
    /// Create a new client with the given configuration.
    pub fn new(config: CpConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        let agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|_| FetchError::Config("invalid user agent".to_string()))?;
        headers.insert(USER_AGENT, agent);
        headers.insert(ACCEPT, HeaderValue::from_static("text/html"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Site root this client fetches from.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Download the raw results page for `query`.
    pub async fn fetch(&self, query: &ConnectionQuery) -> Result<Vec<u8>, FetchError> {
        let url = query.url(&self.base_url)?;
        debug!(%url, "Fetching results page");

        let response = self.http.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        let body = response.bytes().await?;
        debug!(bytes = body.len(), "Fetched results page");
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = CpConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
        assert!(config.user_agent.starts_with("cp-connections/"));
    }

    #[test]
    fn config_builder() {
        let config = CpConfig::new()
            .with_base_url("http://localhost:8080")
            .with_timeout(5)
            .with_user_agent("test");

        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.user_agent, "test");
    }

    #[test]
    fn client_creation() {
        let client = CpClient::new(CpConfig::default()).unwrap();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn rejects_invalid_user_agent() {
        let err = CpClient::new(CpConfig::new().with_user_agent("bad\nagent")).unwrap_err();
        assert!(matches!(err, FetchError::Config(_)));
    }

    #[test]
    fn error_display() {
        let err = FetchError::Status {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "site returned status 503: Service Unavailable");

        let err = FetchError::from(QueryError::SameStations("Senec".into()));
        assert!(err.to_string().contains("same as arrival"));
    }

    // Fetching needs network access and is not exercised here.
}
