//! `TambolaServer` builder and accept loop.
//!
//! Ties the layers together: WebSocket listener → gateway → registry →
//! room actors.

use std::sync::Arc;

use tambola_protocol::JsonCodec;
use tambola_room::RoomRegistry;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

use crate::gateway::handle_connection;
use crate::wallet::EntryGate;
use crate::ServerError;

/// Port used when none is configured.
pub const DEFAULT_PORT: u16 = 10000;

/// Shared server state passed to each connection handler task.
///
/// The registry lock is held only for room creation and lookup; every
/// game operation goes through the per-room mailbox instead, so rooms
/// never contend with each other here.
pub(crate) struct ServerState<W: EntryGate> {
    pub(crate) registry: Mutex<RoomRegistry>,
    pub(crate) gate: W,
    pub(crate) codec: JsonCodec,
}

/// Builder for configuring and starting a Tambola server.
///
/// # Example
///
/// ```rust,ignore
/// let server = TambolaServerBuilder::new()
///     .bind("0.0.0.0:10000")
///     .build(OpenGate)
///     .await?;
/// server.run().await
/// ```
pub struct TambolaServerBuilder {
    bind_addr: String,
}

impl TambolaServerBuilder {
    /// Creates a builder with the default listen address.
    pub fn new() -> Self {
        Self {
            bind_addr: format!("0.0.0.0:{DEFAULT_PORT}"),
        }
    }

    /// Sets the address to bind the listener to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Binds the listener and assembles the server with the given
    /// wallet gate.
    pub async fn build<W: EntryGate>(
        self,
        gate: W,
    ) -> Result<TambolaServer<W>, ServerError> {
        let listener = TcpListener::bind(&self.bind_addr).await?;
        tracing::info!(addr = %self.bind_addr, "listener bound");

        let state = Arc::new(ServerState {
            registry: Mutex::new(RoomRegistry::new()),
            gate,
            codec: JsonCodec,
        });

        Ok(TambolaServer { listener, state })
    }
}

impl Default for TambolaServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A running Tambola session server.
pub struct TambolaServer<W: EntryGate> {
    listener: TcpListener,
    state: Arc<ServerState<W>>,
}

impl<W: EntryGate> TambolaServer<W> {
    /// Creates a new builder.
    pub fn builder() -> TambolaServerBuilder {
        TambolaServerBuilder::new()
    }

    /// Returns the local address the listener is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.listener.local_addr()
    }

    /// Runs the accept loop, spawning a handler task per connection.
    /// Runs until the process is terminated.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!("tambola server running");

        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    tracing::debug!(%addr, "accepted connection");
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        if let Err(error) =
                            handle_connection(stream, state).await
                        {
                            tracing::debug!(
                                %error, "connection ended with error"
                            );
                        }
                    });
                }
                Err(error) => {
                    tracing::error!(%error, "accept failed");
                }
            }
        }
    }
}
