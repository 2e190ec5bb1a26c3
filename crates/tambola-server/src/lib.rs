//! WebSocket gateway for the Tambola session server.
//!
//! One persistent connection per client carrying UTF-8 JSON envelopes.
//! The gateway decodes inbound messages, routes them through the
//! [`RoomRegistry`](tambola_room::RoomRegistry) to the addressed room
//! actor, and pumps room events back out. It holds no game state of its
//! own.

mod error;
mod gateway;
mod server;
mod wallet;

pub use error::ServerError;
pub use server::{DEFAULT_PORT, TambolaServer, TambolaServerBuilder};
pub use wallet::{EntryGate, GateError, OpenGate};
