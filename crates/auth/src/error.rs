use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    /// The client id is empty.
    #[error("Invalid credentials: client id must not be empty")]
    EmptyClientId,

    /// The client id contains the `:` payload separator.
    #[error("Invalid credentials: client id must not contain ':'")]
    ClientIdContainsSeparator,

    /// The client secret is empty.
    #[error("Invalid credentials: client secret must not be empty")]
    EmptyClientSecret,

    /// The instant has no tick representation (before year 1 or after 9999).
    #[error("Timestamp out of range: {0}")]
    TimestampOutOfRange(DateTime<Utc>),
}
