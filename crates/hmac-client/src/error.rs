//! Signed client error types.

use auth::{AuthError, ParseTimestampFormatError};
use rest_client::{RestError, StatusCode};
use thiserror::Error;

/// Errors raised while building a `ClientConfig` or client.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The base address is empty (or only slashes).
    #[error("base address must not be empty")]
    EmptyBaseAddress,

    /// A header name is empty or whitespace-only.
    #[error("{0} header name must not be empty")]
    EmptyHeaderName(&'static str),

    /// A header name contains characters HTTP does not allow.
    #[error("invalid {kind} header name '{name}'")]
    InvalidHeaderName {
        /// Which header ("hash" or "timestamp").
        kind: &'static str,
        /// The rejected name.
        name: String,
    },

    /// Two signed headers share a name, or one collides with `Accept`.
    #[error("header name '{0}' is used more than once")]
    DuplicateHeaderName(String),

    /// The client id cannot be carried in an HTTP header value.
    #[error("client id '{0}' is not a valid header value")]
    InvalidClientId(String),

    /// A required environment variable is missing.
    #[error("missing environment variable: {0}")]
    MissingEnvVar(String),

    /// The configured timestamp format is unknown.
    #[error(transparent)]
    TimestampFormat(#[from] ParseTimestampFormatError),
}

/// Errors from the JSON codec.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The request item could not be serialized.
    #[error("JSON encode error: {0}")]
    Encode(String),

    /// The response body could not be deserialized.
    #[error("JSON decode error: {0}")]
    Decode(String),
}

/// Errors that can occur when calling a service through `HmacHttpClient`.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Invalid credentials.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Transport failure (connection, DNS, timeout).
    #[error("transport error: {0}")]
    Rest(#[from] RestError),

    /// Non-success status on a call that requires success.
    #[error("HTTP error: {status} - {body}")]
    Status {
        /// Response status code.
        status: StatusCode,
        /// Response body as text.
        body: String,
    },

    /// JSON encoding or decoding failed.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// A signed header value could not be rendered.
    #[error("invalid header value for '{0}'")]
    InvalidHeaderValue(String),
}

impl ClientError {
    /// Status code, if this is an HTTP-status error.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
