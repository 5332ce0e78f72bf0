//! REST transport error types.

use thiserror::Error;

/// Errors that can occur while sending a request.
///
/// Status codes are not errors at this layer: any response that arrives is
/// handed back to the caller with its status.
#[derive(Debug, Error)]
pub enum RestError {
    /// Request timed out.
    #[error("Request timeout")]
    Timeout,

    /// Connection error (network issue, DNS failure).
    #[error("Connection error: {0}")]
    Connection(String),

    /// Failed to read the response body.
    #[error("Response body error: {0}")]
    Body(String),

    /// Failed to build the HTTP client or request.
    #[error("Request build error: {0}")]
    RequestBuild(String),
}

impl From<reqwest::Error> for RestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RestError::Timeout
        } else if err.is_connect() {
            RestError::Connection(err.to_string())
        } else if err.is_body() || err.is_decode() {
            RestError::Body(err.to_string())
        } else if err.is_builder() {
            RestError::RequestBuild(err.to_string())
        } else {
            RestError::Connection(err.to_string())
        }
    }
}
