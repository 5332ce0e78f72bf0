//! HTTP client that authenticates every request with a time-bound HMAC.
//!
//! Each call signs the current instant with the shared secret and attaches:
//!
//! - **Timestamp** (name configurable): the instant in round-trip UTC,
//!   e.g. `2024-03-01T12:00:00.1234567Z`
//! - **Hash** (name configurable): `<client_id>:<base64(HMAC-SHA256(secret, ticks))>`
//! - **Accept**: `application/json`
//!
//! Headers are computed per request and never stored on the client, so one
//! client can serve concurrent tasks.
//!
//! # Example
//!
//! ```rust,ignore
//! use auth::ClientCredentials;
//! use hmac_client::{ClientConfig, HmacHttpClient};
//!
//! let config = ClientConfig::new("https://localhost:12345/")?;
//! let credentials = ClientCredentials::new("acme-client", "s3cr3t")?;
//! let client = HmacHttpClient::new(config, credentials)?;
//!
//! let widget: Widget = client.get("api/widgets/1").await?;
//! let created = client.post("api/widgets", &widget).await?;
//! let status = client.delete("api/widgets/1").await?;
//! ```

mod client;
mod codec;
mod config;
mod error;
mod headers;

pub use auth::{ClientCredentials, TimestampFormat};
pub use client::HmacHttpClient;
pub use codec::{JsonCodec, SerdeJsonCodec};
pub use config::{
    ClientConfig, BASE_URL_ENV, DEFAULT_HASH_HEADER, DEFAULT_TIMESTAMP_HEADER, HASH_HEADER_ENV,
    TIMESTAMP_FORMAT_ENV, TIMESTAMP_HEADER_ENV,
};
pub use error::{ClientError, CodecError, ConfigError};
pub use headers::SignedHeaders;
