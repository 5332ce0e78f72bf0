//! Shared-secret credential management.
//!
//! Uses the `secrecy` crate to prevent accidental logging of the client secret
//! and ensures memory is zeroed on drop.

use crate::error::AuthError;
use secrecy::{ExposeSecret, SecretString};

/// Environment variable holding the client id.
pub const CLIENT_ID_ENV: &str = "HMAC_CLIENT_ID";
/// Environment variable holding the client secret.
pub const CLIENT_SECRET_ENV: &str = "HMAC_CLIENT_SECRET";

/// Client id and shared secret used to sign requests.
///
/// Both values are validated on construction, so a `ClientCredentials` value
/// is always usable for signing. The secret is wrapped in `SecretString` which:
/// - Prevents accidental Debug/Display printing
/// - Zeros memory on drop via zeroize
#[derive(Clone)]
pub struct ClientCredentials {
    client_id: String,
    client_secret: SecretString,
}

impl ClientCredentials {
    /// Create credentials from explicit values.
    ///
    /// # Errors
    /// Returns `AuthError::EmptyClientId` or `AuthError::EmptyClientSecret`
    /// if either value is empty, and `AuthError::ClientIdContainsSeparator`
    /// if the client id contains `:`.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self, AuthError> {
        let client_id = client_id.into();
        let client_secret = client_secret.into();

        if client_id.is_empty() {
            return Err(AuthError::EmptyClientId);
        }
        // Verifiers split the hash payload on the first ':'
        if client_id.contains(':') {
            return Err(AuthError::ClientIdContainsSeparator);
        }
        if client_secret.is_empty() {
            return Err(AuthError::EmptyClientSecret);
        }

        Ok(Self {
            client_id,
            client_secret: SecretString::from(client_secret),
        })
    }

    /// Load credentials from environment variables.
    ///
    /// Looks for:
    /// - `HMAC_CLIENT_ID` - The client id (sent in clear text)
    /// - `HMAC_CLIENT_SECRET` - The shared secret (never sent)
    ///
    /// # Errors
    /// Returns `AuthError::MissingEnvVar` if either variable is not set, or a
    /// validation error if either is empty.
    pub fn from_env() -> Result<Self, AuthError> {
        // Load .env file if present (ignores errors if file doesn't exist)
        dotenvy::dotenv().ok();

        let client_id = std::env::var(CLIENT_ID_ENV)
            .map_err(|_| AuthError::MissingEnvVar(CLIENT_ID_ENV.into()))?;

        let client_secret = std::env::var(CLIENT_SECRET_ENV)
            .map_err(|_| AuthError::MissingEnvVar(CLIENT_SECRET_ENV.into()))?;

        Self::new(client_id, client_secret)
    }

    /// Get the client id (public, safe to log).
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Expose the shared secret for signing.
    ///
    /// **WARNING**: Only use this for cryptographic operations.
    /// Never log or display the return value.
    pub fn expose_secret(&self) -> &str {
        self.client_secret.expose_secret()
    }
}

impl std::fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .finish()
    }
}
