//! Client configuration.

use std::time::Duration;

use crate::error::ClientError;

/// Default API base URL, including the version prefix.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/v1";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL up to and including `/v1`.
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Create config from environment variables.
    ///
    /// Uses `LOCATR_API_URL` (falling back to [`DEFAULT_API_URL`]) and
    /// `LOCATR_API_KEY`, which is required.
    pub fn from_env() -> Result<Self, ClientError> {
        let base_url =
            std::env::var("LOCATR_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let api_key = std::env::var("LOCATR_API_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ClientError::Config("LOCATR_API_KEY is not set".to_string()))?;
        Ok(Self::new(base_url, api_key))
    }
}
