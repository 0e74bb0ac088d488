//! API client error types
//!
//! Every failure a call can produce. The variant is fixed where the failure
//! happens; observers see the same value the caller receives.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Errors returned by [`ApiClient`](super::ApiClient) calls
#[derive(Error, Debug)]
pub enum ApiError {
    /// No response was received (connection refused, DNS, timeout)
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// The server answered with a non-success status
    #[error("API error {status}: {body}")]
    Status {
        status: StatusCode,
        /// Decoded response body; JSON when possible, otherwise a string
        body: Value,
    },

    /// The request body could not be serialized to JSON
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// A success response carried a body that is not the expected JSON
    #[error("Failed to decode response ({status}): {source}")]
    Decode {
        status: StatusCode,
        #[source]
        source: serde_json::Error,
    },

    /// Base address and path do not form a valid URL
    #[error("Invalid request URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl ApiError {
    /// No response was received
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }

    /// The fixed client timeout elapsed
    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Network(e) if e.is_timeout())
    }

    /// Response status attached to the error, if a response was received
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } | ApiError::Decode { status, .. } => Some(*status),
            ApiError::Network(e) => e.status(),
            _ => None,
        }
    }

    /// Body of an error-status response
    pub fn body(&self) -> Option<&Value> {
        match self {
            ApiError::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Result type alias for API calls
pub type ApiResult<T> = Result<T, ApiError>;
