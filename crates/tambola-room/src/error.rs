//! Error types for the room layer.
//!
//! Per the protocol's defensive stance most of these are never surfaced
//! to clients — the gateway logs them at debug and drops the triggering
//! message.

use tambola_protocol::RoomCode;

/// Errors that can occur during room operations.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// No room with this code exists.
    #[error("room {0} not found")]
    NotFound(RoomCode),

    /// The game already started; late joins are rejected.
    #[error("room {0} already started")]
    AlreadyStarted(RoomCode),

    /// The room's command channel is closed or full.
    #[error("room {0} is unavailable")]
    Unavailable(RoomCode),
}
