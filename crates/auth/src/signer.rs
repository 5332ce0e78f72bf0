//! HMAC-SHA256 timestamp signing.

use crate::credentials::ClientCredentials;
use crate::error::AuthError;
use crate::timestamp::{to_ticks, TimestampFormat};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Header values produced by one signing pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSignature {
    /// Formatted instant for the timestamp header.
    pub timestamp: String,
    /// `<client_id>:<base64 hash>` for the hash header.
    pub hash_payload: String,
}

/// Request signer for the shared-secret timestamp scheme.
pub struct RequestSigner<'a> {
    credentials: &'a ClientCredentials,
    format: TimestampFormat,
}

impl<'a> RequestSigner<'a> {
    /// Create a new request signer using the round-trip timestamp format.
    pub fn new(credentials: &'a ClientCredentials) -> Self {
        Self {
            credentials,
            format: TimestampFormat::default(),
        }
    }

    /// Use a different timestamp header format.
    pub fn with_format(mut self, format: TimestampFormat) -> Self {
        self.format = format;
        self
    }

    /// Hash a message and return the base64-encoded digest.
    ///
    /// This computes HMAC-SHA256 of the message keyed by the UTF-8 bytes of
    /// the client secret, encoded with the standard padded alphabet.
    pub fn hash(&self, message: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.credentials.expose_secret().as_bytes())
            .expect("HMAC can take key of any size");

        mac.update(message.as_bytes());
        STANDARD.encode(mac.finalize().into_bytes())
    }

    /// Hash the decimal tick count of an instant.
    pub fn hash_ticks(&self, ticks: i64) -> String {
        self.hash(&ticks.to_string())
    }

    /// Sign the current instant.
    pub fn sign(&self) -> Result<RequestSignature, AuthError> {
        self.sign_at(Utc::now())
    }

    /// Sign a given instant.
    ///
    /// The instant is first truncated to the precision of the header format;
    /// that single value is both hashed (as ticks) and formatted.
    ///
    /// # Errors
    /// Returns `AuthError::TimestampOutOfRange` for instants outside
    /// 0001-01-01..=9999-12-31, which have no tick representation.
    pub fn sign_at(&self, instant: DateTime<Utc>) -> Result<RequestSignature, AuthError> {
        let instant = self.format.truncate(instant);
        let ticks = to_ticks(&instant).ok_or(AuthError::TimestampOutOfRange(instant))?;
        let hash = self.hash_ticks(ticks);

        tracing::trace!(
            client_id = %self.credentials.client_id(),
            ticks = ticks,
            "Signed request timestamp"
        );

        Ok(RequestSignature {
            timestamp: self.format.format(&instant),
            hash_payload: format!("{}:{}", self.credentials.client_id(), hash),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timestamp::from_ticks;
    use chrono::TimeZone;

    fn creds() -> ClientCredentials {
        ClientCredentials::new("acme-client", "s3cr3t").unwrap()
    }

    #[test]
    fn test_hash_known_vector() {
        let creds = creds();
        let signer = RequestSigner::new(&creds);

        assert_eq!(
            signer.hash_ticks(638_449_920_000_000_000),
            "u36n156yWvfl00l2pFO2HTyuh52SGwvlJAz2F1svlQY="
        );
    }

    #[test]
    fn test_hash_empty_message() {
        let creds = creds();
        let signer = RequestSigner::new(&creds);

        assert_eq!(
            signer.hash(""),
            "PIHMlJbhwlJQ9sy4X2l8G7Yj40gNZTitjLamZIFCd30="
        );
    }

    #[test]
    fn test_hash_is_deterministic() {
        let creds = creds();
        let signer = RequestSigner::new(&creds);

        assert_eq!(
            signer.hash_ticks(638_449_920_000_000_000),
            signer.hash_ticks(638_449_920_000_000_000)
        );
    }

    #[test]
    fn test_one_tick_changes_hash() {
        let creds = creds();
        let signer = RequestSigner::new(&creds);

        let next = signer.hash_ticks(638_449_920_000_000_001);
        assert_eq!(next, "aDT1gyS0JVS9r5w9tQqx008S6dFfo/ltB1pNKuExipQ=");
        assert_ne!(signer.hash_ticks(638_449_920_000_000_000), next);
    }

    #[test]
    fn test_sign_at_known_instant() {
        let creds = creds();
        let signer = RequestSigner::new(&creds);
        let instant = from_ticks(638_449_920_000_000_000).unwrap();

        let signature = signer.sign_at(instant).unwrap();

        assert_eq!(signature.timestamp, "2024-03-02T16:00:00.0000000Z");
        assert_eq!(
            signature.hash_payload,
            "acme-client:u36n156yWvfl00l2pFO2HTyuh52SGwvlJAz2F1svlQY="
        );
    }

    #[test]
    fn test_sign_at_rejects_out_of_range_instants() {
        let creds = creds();
        let signer = RequestSigner::new(&creds);

        for instant in [
            Utc.with_ymd_and_hms(30000, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(0, 1, 1, 0, 0, 0).unwrap(),
        ] {
            let err = signer.sign_at(instant).unwrap_err();
            assert!(matches!(err, AuthError::TimestampOutOfRange(at) if at == instant));
        }
    }

    #[test]
    fn test_sign_at_first_tick() {
        let creds = creds();
        let signer = RequestSigner::new(&creds);
        let instant = Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0).unwrap();

        let signature = signer.sign_at(instant).unwrap();

        assert_eq!(signature.timestamp, "0001-01-01T00:00:00.0000000Z");
        assert_eq!(
            signature.hash_payload,
            format!("acme-client:{}", signer.hash_ticks(0))
        );
    }

    #[test]
    fn test_sortable_truncates_before_hashing() {
        let creds = creds();
        let signer = RequestSigner::new(&creds).with_format(TimestampFormat::Sortable);
        let instant = Utc.timestamp_opt(1_709_395_200, 987_654_321).unwrap();

        let signature = signer.sign_at(instant).unwrap();

        assert_eq!(signature.timestamp, "2024-03-02T16:00:00");
        assert!(signature
            .hash_payload
            .ends_with(":u36n156yWvfl00l2pFO2HTyuh52SGwvlJAz2F1svlQY="));
    }

    #[test]
    fn test_payload_prefix_is_client_id() {
        let creds = creds();
        let signer = RequestSigner::new(&creds);

        let signature = signer.sign().unwrap();
        let (prefix, hash) = signature.hash_payload.split_once(':').unwrap();

        assert_eq!(prefix, "acme-client");
        assert_eq!(STANDARD.decode(hash).unwrap().len(), 32);
    }

    #[test]
    fn test_different_secrets_differ() {
        let a = ClientCredentials::new("acme-client", "s3cr3t").unwrap();
        let b = ClientCredentials::new("acme-client", "other").unwrap();

        assert_ne!(
            RequestSigner::new(&a).hash_ticks(1),
            RequestSigner::new(&b).hash_ticks(1)
        );
    }
}
