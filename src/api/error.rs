//! Failure classification for the HTTP layer.
//!
//! The retry policy only applies to transport failures: a request that never
//! produced a response (network unreachable, connect failure, timeout). An
//! HTTP error response means the server is reachable, so retrying is
//! unlikely to help and may duplicate side effects on the POST endpoints.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request error: {source} for url: {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error: {status} for url: {url}")]
    Status { status: StatusCode, url: String },

    #[error("failed to parse response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl ApiError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::Transport { .. })
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
