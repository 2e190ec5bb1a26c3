//! Wallet precondition hook.
//!
//! The ledger/wallet subsystem lives elsewhere in the application; this
//! core only consumes one question from it: "may this player enter a
//! room?". The [`EntryGate`] trait is that seam. Debits and credits are
//! the wallet's business, not ours.

/// Why a player was refused entry.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    /// The player's play balance is below the entry threshold.
    #[error("insufficient balance for {player}")]
    InsufficientBalance { player: String },

    /// The wallet backend could not be reached.
    #[error("wallet unavailable: {0}")]
    Unavailable(String),
}

/// Decides whether a player may create or join a room.
///
/// Implement this against the real wallet service; the gateway calls it
/// before every CREATE_ROOM and JOIN_ROOM. A refusal drops the message
/// silently — entry gating is a precondition, not a protocol outcome.
pub trait EntryGate: Send + Sync + 'static {
    /// Returns `Ok(())` if the player's balance clears the threshold.
    fn allow_entry(
        &self,
        player: &str,
    ) -> impl std::future::Future<Output = Result<(), GateError>> + Send;
}

/// An [`EntryGate`] that admits everyone. For development and tests,
/// and for deployments where the wallet check happens upstream.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenGate;

impl EntryGate for OpenGate {
    async fn allow_entry(&self, _player: &str) -> Result<(), GateError> {
        Ok(())
    }
}
