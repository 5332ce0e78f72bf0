//! JSON codec seam.

use crate::error::CodecError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Encodes request items and decodes response bodies.
pub trait JsonCodec: Send + Sync {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError>;

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError>;
}

/// `serde_json`-backed codec used by default.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeJsonCodec;

impl JsonCodec for SerdeJsonCodec {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(value).map_err(|e| CodecError::Encode(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError> {
        serde_json::from_slice(bytes).map_err(|e| CodecError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Widget {
        id: u32,
        name: String,
    }

    #[test]
    fn test_decode_widget() {
        let widget: Widget = SerdeJsonCodec
            .decode(br#"{"id":7,"name":"sprocket"}"#)
            .unwrap();
        assert_eq!(
            widget,
            Widget {
                id: 7,
                name: "sprocket".into()
            }
        );
    }

    #[test]
    fn test_decode_malformed() {
        let err = SerdeJsonCodec.decode::<Widget>(b"{\"id\":").unwrap_err();
        assert!(matches!(err, CodecError::Decode(_)));
    }

    #[test]
    fn test_encode_unsized() {
        let bytes = SerdeJsonCodec.encode("plain").unwrap();
        assert_eq!(bytes, br#""plain""#);
    }
}
