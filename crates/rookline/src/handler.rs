//! Per-connection handler: frame decoding and the outbound writer.
//!
//! Each accepted connection gets its own Tokio task running
//! [`handle_connection`], which splits the work in two:
//!
//! - the **read loop** (this task) decodes one frame at a time and hands
//!   it to the coordinator, so commands from one client run in order;
//! - the **writer** (a spawned task) drains the connection's outbound
//!   channel onto the socket.
//!
//! The coordinator and the registry only ever see the channel. When the
//! socket goes away the writer is stopped, its receiver drops, and the
//! registry prunes the entry the next time it tries to send.

use std::sync::Arc;

use rookline_protocol::{ClientCommand, Codec, ServerMessage};
use rookline_session::IdentityProvider;
use rookline_store::GameStore;
use rookline_transport::{Connection, WebSocketConnection};
use tokio::sync::mpsc;

use crate::server::ServerState;
use crate::{CommandError, RookError};

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection<S, I, C>(
    conn: WebSocketConnection,
    state: Arc<ServerState<S, I, C>>,
) -> Result<(), RookError>
where
    S: GameStore,
    I: IdentityProvider,
    C: Codec,
{
    let conn = Arc::new(conn);
    let conn_id = conn.id();
    tracing::debug!(%conn_id, peer = %conn.peer_addr(), "handling new connection");

    let (tx, rx) = mpsc::unbounded_channel();
    let writer = tokio::spawn(write_loop(Arc::clone(&conn), rx, Arc::clone(&state)));

    let result = read_loop(&conn, &state, &tx).await;

    // Dropping the receiver marks every registry copy of `tx` closed.
    writer.abort();
    if let Err(e) = conn.close().await {
        tracing::debug!(%conn_id, error = %e, "close after disconnect failed");
    }
    result
}

/// Reads frames until the peer closes, running each as a command.
async fn read_loop<S, I, C>(
    conn: &WebSocketConnection,
    state: &ServerState<S, I, C>,
    tx: &mpsc::UnboundedSender<ServerMessage>,
) -> Result<(), RookError>
where
    S: GameStore,
    I: IdentityProvider,
    C: Codec,
{
    let conn_id = conn.id();
    loop {
        let Some(data) = conn.recv().await? else {
            tracing::info!(%conn_id, "connection closed cleanly");
            return Ok(());
        };
        tracing::debug!(%conn_id, bytes = data.len(), "frame received");

        let command: ClientCommand = match state
            .codec
            .decode_bounded(&data, state.config.max_message_bytes)
        {
            Ok(command) => command,
            Err(e) => {
                tracing::debug!(%conn_id, error = %e, "rejected frame");
                let _ = tx.send(ServerMessage::error(CommandError::from(e)));
                continue;
            }
        };

        state.coordinator.handle(command, tx).await;
    }
}

/// Encodes queued messages and writes them to the socket, in order.
async fn write_loop<S, I, C>(
    conn: Arc<WebSocketConnection>,
    mut rx: mpsc::UnboundedReceiver<ServerMessage>,
    state: Arc<ServerState<S, I, C>>,
) where
    S: GameStore,
    I: IdentityProvider,
    C: Codec,
{
    let conn_id = conn.id();
    while let Some(msg) = rx.recv().await {
        let bytes = match state.codec.encode(&msg) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(%conn_id, error = %e, "failed to encode message");
                continue;
            }
        };
        if let Err(e) = conn.send(&bytes).await {
            tracing::debug!(%conn_id, error = %e, "send failed, stopping writer");
            break;
        }
    }
}
