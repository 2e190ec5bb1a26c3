//! Room registry: allocates room codes and routes lookups to actors.

use std::collections::HashMap;

use rand::seq::IndexedRandom;
use tambola_protocol::{DrawMode, RoomCode};

use crate::room::spawn_room;
use crate::{ConnectionId, EventSender, RoomHandle};

/// Characters used in room codes. Uppercase plus digits, matching what
/// players type from a lobby screen.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of a room code. 36^5 codes — collisions are re-rolled.
const CODE_LEN: usize = 5;

/// Default mailbox size for room actors.
const DEFAULT_CHANNEL_SIZE: usize = 64;

/// Process-wide map from room code to room actor handle.
///
/// Creation and lookup only; rooms live until process teardown. The
/// gateway owns one of these behind a lock — the registry itself is a
/// plain value, injected rather than ambient.
pub struct RoomRegistry {
    rooms: HashMap<RoomCode, RoomHandle>,
}

impl RoomRegistry {
    /// Creates a new, empty registry.
    pub fn new() -> Self {
        Self {
            rooms: HashMap::new(),
        }
    }

    /// Opens a new room with `host` as its creator and sole roster
    /// entry, and returns its code and actor handle.
    ///
    /// The code is re-rolled until unused, so a collision can never
    /// clobber a live room.
    pub fn create_room(
        &mut self,
        host: ConnectionId,
        host_name: String,
        mode: DrawMode,
        sender: EventSender,
    ) -> (RoomCode, RoomHandle) {
        let code = self.allocate_code(random_code);

        let handle = spawn_room(
            code.clone(),
            mode,
            host,
            host_name,
            sender,
            DEFAULT_CHANNEL_SIZE,
        );
        self.rooms.insert(code.clone(), handle.clone());
        tracing::info!(room = %code, "room registered");
        (code, handle)
    }

    /// Pulls candidates from `next` until one is not already registered.
    fn allocate_code(&self, mut next: impl FnMut() -> RoomCode) -> RoomCode {
        loop {
            let candidate = next();
            if !self.rooms.contains_key(&candidate) {
                break candidate;
            }
        }
    }

    /// Looks up a room by code. `None` means the caller should drop the
    /// triggering message.
    pub fn get(&self, code: &RoomCode) -> Option<RoomHandle> {
        self.rooms.get(code).cloned()
    }

    /// Returns the number of registered rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn random_code() -> RoomCode {
    let mut rng = rand::rng();
    let code: String = (0..CODE_LEN)
        .map(|_| {
            *CODE_ALPHABET
                .choose(&mut rng)
                .expect("alphabet is non-empty") as char
        })
        .collect();
    RoomCode::new(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_allocate_code_rerolls_occupied_candidates() {
        let mut registry = RoomRegistry::new();
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        let (taken, _handle) = registry.create_room(
            ConnectionId::next(),
            "Alice".into(),
            DrawMode::Auto,
            tx,
        );

        // First candidate collides with the live room; the loop must
        // move on to the next one instead of clobbering it.
        let mut candidates =
            [taken.clone(), RoomCode::new("FRESH")].into_iter();
        let code = registry
            .allocate_code(|| candidates.next().expect("ran out of candidates"));
        assert_eq!(code, RoomCode::new("FRESH"));
        assert!(registry.get(&taken).is_some());
    }

    #[test]
    fn test_random_code_shape() {
        for _ in 0..100 {
            let code = random_code();
            assert_eq!(code.as_str().len(), CODE_LEN);
            assert!(
                code.as_str()
                    .bytes()
                    .all(|b| CODE_ALPHABET.contains(&b)),
                "unexpected character in {code}"
            );
        }
    }
}
