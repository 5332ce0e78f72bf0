//! Credentials and request signing for the shared-secret HMAC scheme.
//!
//! Every request carries two values derived from a single instant:
//!
//! - a **timestamp header** with the instant formatted in UTC, and
//! - a **hash header** `<client_id>:<base64(HMAC-SHA256(secret, ticks))>`,
//!   where `ticks` is the decimal count of 100 ns intervals since
//!   0001-01-01T00:00:00Z.
//!
//! A verifier holding the same secret parses the timestamp, recomputes the
//! ticks and compares hashes.
//!
//! # Features
//!
//! - **Secure Credentials**: the secret is wrapped in `SecretString` to prevent
//!   accidental logging and ensure memory is zeroed on drop.
//! - **Fail-fast validation**: empty client ids or secrets are rejected when
//!   credentials are created.
//! - **Environment Loading**: credentials can be loaded from environment
//!   variables or a `.env` file.
//!
//! # Example
//!
//! ```rust,ignore
//! use auth::{ClientCredentials, RequestSigner};
//!
//! let credentials = ClientCredentials::new("acme-client", "s3cr3t")?;
//! let signature = RequestSigner::new(&credentials).sign()?;
//!
//! // signature.timestamp    -> "2024-03-01T12:00:00.1234567Z"
//! // signature.hash_payload -> "acme-client:Xg8f...="
//! ```

mod credentials;
mod error;
mod signer;
pub mod timestamp;

pub use credentials::{ClientCredentials, CLIENT_ID_ENV, CLIENT_SECRET_ENV};
pub use error::AuthError;
pub use signer::{RequestSignature, RequestSigner};
pub use timestamp::{ParseTimestampFormatError, TimestampFormat};
