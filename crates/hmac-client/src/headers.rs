//! Per-request signed header set.

use crate::error::ClientError;
use rest_client::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};

const APPLICATION_JSON: &str = "application/json";

/// Authentication headers for exactly one request.
///
/// Built fresh by `HmacHttpClient::initialize_request` and consumed by the
/// request it was built for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    pub timestamp_header_name: HeaderName,
    pub timestamp_value: String,
    pub hash_header_name: HeaderName,
    pub hash_payload: String,
}

impl SignedHeaders {
    /// Render the header set: timestamp, hash and `Accept: application/json`.
    ///
    /// Each name appears exactly once.
    pub fn to_header_map(&self) -> Result<HeaderMap, ClientError> {
        let mut headers = HeaderMap::with_capacity(3);
        headers.insert(
            self.timestamp_header_name.clone(),
            header_value(&self.timestamp_header_name, &self.timestamp_value)?,
        );
        headers.insert(
            self.hash_header_name.clone(),
            header_value(&self.hash_header_name, &self.hash_payload)?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
        Ok(headers)
    }
}

fn header_value(name: &HeaderName, value: &str) -> Result<HeaderValue, ClientError> {
    HeaderValue::from_str(value).map_err(|_| ClientError::InvalidHeaderValue(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed() -> SignedHeaders {
        SignedHeaders {
            timestamp_header_name: HeaderName::from_static("timestamp"),
            timestamp_value: "2024-03-02T16:00:00.0000000Z".into(),
            hash_header_name: HeaderName::from_static("hash"),
            hash_payload: "acme-client:u36n156yWvfl00l2pFO2HTyuh52SGwvlJAz2F1svlQY=".into(),
        }
    }

    #[test]
    fn test_header_map_contents() {
        let headers = signed().to_header_map().unwrap();

        assert_eq!(headers.len(), 3);
        assert_eq!(headers["Timestamp"], "2024-03-02T16:00:00.0000000Z");
        assert_eq!(
            headers["Hash"],
            "acme-client:u36n156yWvfl00l2pFO2HTyuh52SGwvlJAz2F1svlQY="
        );
        assert_eq!(headers[ACCEPT], "application/json");
    }

    #[test]
    fn test_invalid_value_rejected() {
        let mut signed = signed();
        signed.hash_payload = "bad\nvalue".into();

        let err = signed.to_header_map().unwrap_err();
        assert!(matches!(err, ClientError::InvalidHeaderValue(name) if name == "hash"));
    }
}
