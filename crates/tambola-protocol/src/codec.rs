//! Codec trait and the JSON implementation.
//!
//! The gateway never calls `serde_json` directly — it goes through
//! [`Codec`], so the wire format is swappable in one place. The
//! transport carries UTF-8 text frames, so encoding produces a `String`
//! rather than bytes.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// Converts between protocol types and UTF-8 text frames.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into one text frame.
    fn encode<T: Serialize>(&self, value: &T) -> Result<String, ProtocolError>;

    /// Parses one text frame into a value.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Decode`] for malformed JSON, unknown
    /// `type` tags, or missing fields. Callers drop such frames.
    fn decode<T: DeserializeOwned>(&self, text: &str) -> Result<T, ProtocolError>;
}

/// A [`Codec`] using `serde_json`. Human-readable, matches the browser
/// client's `JSON.parse`/`JSON.stringify`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<String, ProtocolError> {
        serde_json::to_string(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, text: &str) -> Result<T, ProtocolError> {
        serde_json::from_str(text).map_err(ProtocolError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClientMessage, DrawMode, RoomCode, ServerEvent};

    #[test]
    fn test_encode_decode_round_trip() {
        let codec = JsonCodec;
        let event = ServerEvent::RoomCreated {
            room_id: RoomCode::new("AB12C"),
        };
        let text = codec.encode(&event).unwrap();
        let back: ServerEvent = codec.decode(&text).unwrap();
        assert_eq!(event, back);
    }

    #[test]
    fn test_decode_client_envelope() {
        let codec = JsonCodec;
        let msg: ClientMessage = codec
            .decode(r#"{"type":"CREATE_ROOM","data":{"player_name":"Alice"}}"#)
            .unwrap();
        assert_eq!(
            msg,
            ClientMessage::CreateRoom {
                player_name: "Alice".into(),
                mode: DrawMode::Auto,
            }
        );
    }

    #[test]
    fn test_decode_garbage_is_an_error() {
        let codec = JsonCodec;
        let result: Result<ClientMessage, _> = codec.decode("not json at all");
        assert!(result.is_err());
    }
}
