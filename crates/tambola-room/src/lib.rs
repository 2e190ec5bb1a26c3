//! Room coordination for the Tambola session server.
//!
//! Each room runs as an isolated Tokio task (actor model) that owns all
//! of its state: roster, tickets, drawn numbers, awarded claims, scores.
//! The mailbox serializes every mutation, which is the whole concurrency
//! story — no locks, no cross-room coupling.
//!
//! # Key types
//!
//! - [`RoomRegistry`] — creates rooms and resolves codes to handles
//! - [`RoomHandle`] — sends commands to a running room actor
//! - [`ConnectionId`] — the identity a player's claims resolve through
//! - [`EventSender`] — per-connection outbound event channel

mod error;
mod registry;
mod room;

pub use error::RoomError;
pub use registry::RoomRegistry;
pub use room::{EventSender, RoomHandle, RoomInfo};

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for generating unique connection IDs.
static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identifier for one client connection.
///
/// The gateway allocates one per accepted socket; rooms bind it to a
/// seat at join time and resolve claimants through that binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Allocates the next process-unique connection ID.
    pub fn next() -> Self {
        Self(NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Creates a `ConnectionId` from a raw `u64`. Mainly for tests.
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_ids_are_unique() {
        let a = ConnectionId::next();
        let b = ConnectionId::next();
        assert_ne!(a, b);
    }

    #[test]
    fn test_connection_id_display() {
        assert_eq!(ConnectionId::from_raw(7).to_string(), "conn-7");
    }

    #[test]
    fn test_connection_id_works_as_map_key() {
        use std::collections::HashMap;
        let mut map = HashMap::new();
        map.insert(ConnectionId::from_raw(1), "alice");
        assert_eq!(map[&ConnectionId::from_raw(1)], "alice");
    }
}
