//! Unified error type for the server crate.

use tambola_protocol::ProtocolError;
use tambola_room::RoomError;

/// Top-level error wrapping the per-layer errors plus the gateway's own
/// I/O failures. The `#[from]` attributes let `?` convert sub-crate
/// errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// An encode/decode error at the wire boundary.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A room-level error (unknown room, unavailable actor).
    #[error(transparent)]
    Room(#[from] RoomError),

    /// Binding or accepting TCP connections failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The WebSocket handshake or framing failed.
    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
}
