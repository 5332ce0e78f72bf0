//! Client configuration.
//!
//! Every field is validated when it is set, so a `ClientConfig` that exists
//! is usable as-is by the request path.

use crate::error::ConfigError;
use auth::TimestampFormat;
use rest_client::header::{HeaderName, ACCEPT};
use rest_client::DEFAULT_TIMEOUT;
use std::time::Duration;

/// Default name of the hash header.
pub const DEFAULT_HASH_HEADER: &str = "Hash";
/// Default name of the timestamp header.
pub const DEFAULT_TIMESTAMP_HEADER: &str = "Timestamp";

/// Environment variable holding the base address.
pub const BASE_URL_ENV: &str = "HMAC_CLIENT_BASE_URL";
/// Environment variable overriding the hash header name.
pub const HASH_HEADER_ENV: &str = "HMAC_CLIENT_HASH_HEADER";
/// Environment variable overriding the timestamp header name.
pub const TIMESTAMP_HEADER_ENV: &str = "HMAC_CLIENT_TIMESTAMP_HEADER";
/// Environment variable selecting the timestamp format.
pub const TIMESTAMP_FORMAT_ENV: &str = "HMAC_CLIENT_TIMESTAMP_FORMAT";

/// Where and how to send signed requests.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base address, trailing slashes stripped.
    base_address: String,
    hash_header_name: HeaderName,
    timestamp_header_name: HeaderName,
    /// Wire format of the timestamp header; must match the verifier.
    timestamp_format: TimestampFormat,
    /// Request timeout handed to the transport.
    timeout: Duration,
}

impl ClientConfig {
    /// Create a configuration with default header names.
    ///
    /// # Errors
    /// Returns `ConfigError::EmptyBaseAddress` if nothing is left after
    /// stripping whitespace and trailing slashes.
    pub fn new(base_address: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_address: normalize_base_address(base_address)?,
            hash_header_name: parse_header_name("hash", DEFAULT_HASH_HEADER)?,
            timestamp_header_name: parse_header_name("timestamp", DEFAULT_TIMESTAMP_HEADER)?,
            timestamp_format: TimestampFormat::default(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Looks for:
    /// - `HMAC_CLIENT_BASE_URL` - Base address (required)
    /// - `HMAC_CLIENT_HASH_HEADER` - Hash header name (default "Hash")
    /// - `HMAC_CLIENT_TIMESTAMP_HEADER` - Timestamp header name (default "Timestamp")
    /// - `HMAC_CLIENT_TIMESTAMP_FORMAT` - "round-trip" (default) or "sortable"
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignores errors if file doesn't exist)
        dotenvy::dotenv().ok();

        let base_address = std::env::var(BASE_URL_ENV)
            .map_err(|_| ConfigError::MissingEnvVar(BASE_URL_ENV.into()))?;

        let mut config = Self::new(&base_address)?;

        if let Ok(name) = std::env::var(HASH_HEADER_ENV) {
            config = config.with_hash_header_name(&name)?;
        }
        if let Ok(name) = std::env::var(TIMESTAMP_HEADER_ENV) {
            config = config.with_timestamp_header_name(&name)?;
        }
        if let Ok(format) = std::env::var(TIMESTAMP_FORMAT_ENV) {
            config = config.with_timestamp_format(format.parse()?);
        }

        Ok(config)
    }

    /// Set the hash header name (trimmed).
    pub fn with_hash_header_name(mut self, name: &str) -> Result<Self, ConfigError> {
        self.hash_header_name = parse_header_name("hash", name)?;
        Ok(self)
    }

    /// Set the timestamp header name (trimmed).
    pub fn with_timestamp_header_name(mut self, name: &str) -> Result<Self, ConfigError> {
        self.timestamp_header_name = parse_header_name("timestamp", name)?;
        Ok(self)
    }

    /// Set the timestamp header format.
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_address(&self) -> &str {
        &self.base_address
    }

    pub fn hash_header_name(&self) -> &HeaderName {
        &self.hash_header_name
    }

    pub fn timestamp_header_name(&self) -> &HeaderName {
        &self.timestamp_header_name
    }

    pub fn timestamp_format(&self) -> TimestampFormat {
        self.timestamp_format
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Check that the signed headers and `Accept` are three distinct names.
    ///
    /// Header names compare case-insensitively, so "Hash" and "hash" collide.
    pub(crate) fn check_distinct_headers(&self) -> Result<(), ConfigError> {
        if self.hash_header_name == self.timestamp_header_name {
            return Err(ConfigError::DuplicateHeaderName(
                self.hash_header_name.to_string(),
            ));
        }
        for name in [&self.hash_header_name, &self.timestamp_header_name] {
            if *name == ACCEPT {
                return Err(ConfigError::DuplicateHeaderName(name.to_string()));
            }
        }
        Ok(())
    }
}

fn normalize_base_address(base_address: &str) -> Result<String, ConfigError> {
    let normalized = base_address.trim().trim_end_matches('/');
    if normalized.is_empty() {
        return Err(ConfigError::EmptyBaseAddress);
    }
    Ok(normalized.to_string())
}

fn parse_header_name(kind: &'static str, name: &str) -> Result<HeaderName, ConfigError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ConfigError::EmptyHeaderName(kind));
    }
    HeaderName::from_bytes(name.as_bytes()).map_err(|_| ConfigError::InvalidHeaderName {
        kind,
        name: name.to_string(),
    })
}
