//! Per-connection handler: decode inbound envelopes, route them to the
//! addressed room, pump outbound events back to the socket.
//!
//! Each accepted connection gets its own Tokio task running
//! [`handle_connection`], plus a writer task draining the connection's
//! event channel. The reader task never touches room state directly —
//! everything goes through a [`RoomHandle`] mailbox.

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use tambola_protocol::{ClientMessage, Codec, ServerEvent};
use tambola_room::{ConnectionId, EventSender, RoomHandle};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;

use crate::server::ServerState;
use crate::wallet::EntryGate;
use crate::ServerError;

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection<W: EntryGate>(
    stream: TcpStream,
    state: Arc<ServerState<W>>,
) -> Result<(), ServerError> {
    let ws = tokio_tungstenite::accept_async(stream).await?;
    let conn = ConnectionId::next();
    tracing::debug!(%conn, "connection established");

    let (mut sink, mut source) = ws.split();

    // Outbound path: room actors push events into this channel; the
    // writer task owns the sink. A failed socket write ends the writer,
    // which in turn makes future sends to this connection no-ops the
    // broadcaster skips over.
    let (tx_out, mut rx_out) = mpsc::unbounded_channel::<ServerEvent>();
    let writer_codec = state.codec;
    tokio::spawn(async move {
        while let Some(event) = rx_out.recv().await {
            let text = match writer_codec.encode(&event) {
                Ok(text) => text,
                Err(error) => {
                    tracing::error!(%error, "failed to encode event");
                    continue;
                }
            };
            if sink.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    // The room this connection has entered, if any. Set exactly once —
    // one room per connection for its whole life.
    let mut joined: Option<RoomHandle> = None;

    while let Some(msg) = source.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(error) => {
                tracing::debug!(%conn, %error, "receive error");
                break;
            }
        };
        match msg {
            Message::Text(text) => {
                match state.codec.decode::<ClientMessage>(text.as_str()) {
                    Ok(cmd) => {
                        route(cmd, &state, &mut joined, conn, &tx_out).await;
                    }
                    Err(error) => {
                        tracing::debug!(
                            %conn, %error, "dropping malformed envelope"
                        );
                    }
                }
            }
            Message::Close(_) => break,
            // Binary frames are not part of this protocol; ping/pong is
            // handled by tungstenite.
            _ => {}
        }
    }

    if let Some(handle) = &joined {
        let _ = handle.disconnect(conn).await;
    }
    tracing::debug!(%conn, "connection closed");
    Ok(())
}

/// Routes one decoded client message. Anything that violates protocol
/// or state expectations is dropped here with a debug log — only claim
/// outcomes travel back as events.
async fn route<W: EntryGate>(
    cmd: ClientMessage,
    state: &Arc<ServerState<W>>,
    joined: &mut Option<RoomHandle>,
    conn: ConnectionId,
    tx_out: &EventSender,
) {
    match cmd {
        ClientMessage::CreateRoom { player_name, mode } => {
            if joined.is_some() {
                tracing::debug!(%conn, "create from roomed connection, ignoring");
                return;
            }
            if let Err(error) = state.gate.allow_entry(&player_name).await {
                tracing::debug!(%conn, player = %player_name, %error, "entry refused");
                return;
            }

            let mut registry = state.registry.lock().await;
            let (_code, handle) = registry.create_room(
                conn,
                player_name,
                mode,
                tx_out.clone(),
            );
            *joined = Some(handle);
        }

        ClientMessage::JoinRoom { room_id, player_name } => {
            if joined.is_some() {
                tracing::debug!(%conn, "join from roomed connection, ignoring");
                return;
            }
            if let Err(error) = state.gate.allow_entry(&player_name).await {
                tracing::debug!(%conn, player = %player_name, %error, "entry refused");
                return;
            }

            // Lock only for the lookup; the join itself is actor I/O.
            let handle = state.registry.lock().await.get(&room_id);
            let Some(handle) = handle else {
                tracing::debug!(%conn, room = %room_id, "unknown room, ignoring");
                return;
            };

            match handle.join(conn, player_name, tx_out.clone()).await {
                Ok(()) => *joined = Some(handle),
                Err(error) => {
                    tracing::debug!(%conn, room = %room_id, %error, "join refused");
                }
            }
        }

        ClientMessage::StartGame => {
            if let Some(handle) = joined {
                let _ = handle.start(conn).await;
            }
        }

        ClientMessage::DrawNumber => {
            if let Some(handle) = joined {
                let _ = handle.draw(conn).await;
            }
        }

        ClientMessage::MakeClaim { claim } => {
            if let Some(handle) = joined {
                let _ = handle.claim(conn, claim).await;
            }
        }
    }
}
