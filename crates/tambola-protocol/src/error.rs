//! Error types for the protocol layer.

/// Errors that can occur while encoding or decoding wire frames.
///
/// Decode failures are expected in normal operation — any client can
/// send garbage — and are dropped at the gateway with a debug log.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed.
    #[error("encode failed: {0}")]
    Encode(#[source] serde_json::Error),

    /// The frame is malformed, has an unknown `type` tag, or is missing
    /// required fields.
    #[error("decode failed: {0}")]
    Decode(#[source] serde_json::Error),
}
