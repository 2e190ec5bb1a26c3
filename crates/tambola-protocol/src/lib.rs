//! Wire protocol for the Tambola session server.
//!
//! This crate defines the language clients and server speak:
//!
//! - **Types** ([`ClientMessage`], [`ServerEvent`], [`Ticket`],
//!   [`ClaimKind`], ...) — the message catalogue, one closed enum per
//!   direction.
//! - **Codec** ([`Codec`], [`JsonCodec`]) — how envelopes become UTF-8
//!   text frames and back.
//! - **Errors** ([`ProtocolError`]) — what can go wrong at the boundary.
//!
//! The protocol layer knows nothing about connections or rooms; it only
//! serializes and deserializes.

mod codec;
mod error;
mod types;

pub use codec::{Codec, JsonCodec};
pub use error::ProtocolError;
pub use types::{
    ClaimKind, ClaimStatus, ClientMessage, DrawMode, LeaderboardEntry,
    RoomCode, ServerEvent, Ticket,
};
