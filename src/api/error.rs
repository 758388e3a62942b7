//! HTTP error classification for the storefront API.
//!
//! Keeps status and `Retry-After` information around long enough for the
//! retry loop to decide whether another attempt is worthwhile, then converts
//! into a `StorefrontError`.

use std::fmt;
use std::time::Duration;

use crate::error::StorefrontError;

/// Rate-limit waits longer than this are surfaced instead of slept through
pub const MAX_RETRY_AFTER: Duration = Duration::from_secs(10);

#[derive(Debug)]
pub struct ApiError {
    /// HTTP status code, if a response was received
    pub status: Option<reqwest::StatusCode>,
    /// Retry-After header value in seconds, if available
    pub retry_after: Option<u64>,
    pub message: String,
    /// Connection-level failure (timeout, refused, reset)
    pub network: bool,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            retry_after: None,
            message: message.into(),
            network: false,
        }
    }

    pub fn with_status(message: impl Into<String>, status: reqwest::StatusCode) -> Self {
        Self {
            status: Some(status),
            ..Self::new(message)
        }
    }

    pub fn with_retry_after(mut self, seconds: u64) -> Self {
        self.retry_after = Some(seconds);
        self
    }

    pub fn is_rate_limited(&self) -> bool {
        self.status.is_some_and(|s| s.as_u16() == 429)
    }

    /// Worth retrying: server errors, rate limits and network failures
    pub fn is_transient(&self) -> bool {
        self.network || self.is_rate_limited() || self.status.is_some_and(|s| s.is_server_error())
    }

    /// Delay requested by the server for a rate-limited response
    pub fn retry_after(&self) -> Option<Duration> {
        if !self.is_rate_limited() {
            return None;
        }
        Some(Duration::from_secs(self.retry_after.unwrap_or(1)))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "HTTP {}: {}", status.as_u16(), self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self {
            status: err.status(),
            retry_after: None,
            network: err.is_timeout() || err.is_connect() || err.is_request(),
            message: err.to_string(),
        }
    }
}

impl From<ApiError> for StorefrontError {
    fn from(err: ApiError) -> Self {
        if err.is_rate_limited() {
            return StorefrontError::RateLimited(err.retry_after.unwrap_or(60));
        }
        match err.status {
            Some(status) if status.as_u16() == 401 || status.as_u16() == 403 => {
                StorefrontError::Auth(err.message)
            }
            Some(status) => StorefrontError::Api {
                status: status.as_u16(),
                message: err.message,
            },
            None => StorefrontError::Other(format!("request failed: {}", err.message)),
        }
    }
}
