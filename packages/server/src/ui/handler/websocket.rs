//! WebSocket connection handlers.
//!
//! One session per upgraded socket:
//!
//! 1. `Connecting`: register, then write the history snapshot straight to the socket
//! 2. `Active`: a reader task decodes inbound frames and publishes them, a writer task
//!    forwards the outbox to the socket
//! 3. `Closed`: whichever task finishes first aborts the other, then the connection is
//!    removed from the registry exactly once

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade, rejection::WebSocketUpgradeRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use relaychat_shared::{codec, time::timestamp_to_rfc3339};
use thiserror::Error;

use crate::{
    domain::{ConnectionId, EncodedMessage, Outbox, Session},
    ui::state::AppState,
};

/// Non-upgrade request reaching the realtime endpoint
#[derive(Debug, Error)]
pub enum HandshakeError {
    #[error("Expected a WebSocket upgrade request ({0})")]
    NotUpgrade(#[from] WebSocketUpgradeRejection),
}

impl IntoResponse for HandshakeError {
    fn into_response(self) -> Response {
        tracing::debug!("Rejected handshake: {}", self);
        (StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}

pub async fn websocket_handler(
    upgrade: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, HandshakeError> {
    let ws = upgrade?;
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state)))
}

/// Write the replay snapshot to the socket in original order.
async fn replay_history(
    sender: &mut SplitSink<WebSocket, Message>,
    replay: &[EncodedMessage],
) -> Result<(), axum::Error> {
    for frame in replay {
        sender.send(Message::Text(frame.to_string().into())).await?;
    }
    Ok(())
}

/// Forward the outbox to the socket until either side closes.
///
/// The outbox closes when the registry drops the connection; what was already queued is
/// still written before the close frame.
fn pusher_loop(
    connection_id: ConnectionId,
    mut outbox: Outbox,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = outbox.recv().await {
            if let Err(e) = sender.send(Message::Text(frame.to_string().into())).await {
                tracing::debug!("Write to connection '{}' failed: {}", connection_id, e);
                return;
            }
        }
        tracing::info!("Connection '{}' outbox closed, closing socket", connection_id);
        let _ = sender.send(Message::Close(None)).await;
    })
}

/// Decode inbound frames and publish them until the peer goes away.
fn reader_loop(
    connection_id: ConnectionId,
    mut receiver: SplitStream<WebSocket>,
    state: Arc<AppState>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on connection '{}': {}", connection_id, e);
                    break;
                }
            };

            let payload = match msg {
                Message::Text(text) => codec::decode_inbound(text.as_str().as_bytes()),
                Message::Binary(data) => codec::decode_inbound(&data),
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id);
                    break;
                }
                // Ping/pong is handled by the WebSocket implementation
                Message::Ping(_) | Message::Pong(_) => continue,
            };

            match payload {
                Ok(message) => {
                    state.send_message_usecase.execute(message).await;
                }
                Err(e) => {
                    tracing::warn!(
                        "Discarding malformed payload from connection '{}': {}",
                        connection_id,
                        e
                    );
                }
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let attached = state.connect_session_usecase.execute().await;
    let connection_id = attached.connection_id;
    let mut session = Session::new(connection_id);
    tracing::info!(
        "Connection '{}' attached at {}, replaying {} message(s)",
        connection_id,
        timestamp_to_rfc3339(attached.connected_at.value()).unwrap_or_default(),
        attached.replay.len()
    );

    let (mut sender, receiver) = socket.split();

    if let Err(e) = replay_history(&mut sender, &attached.replay).await {
        tracing::warn!(
            "History replay to connection '{}' failed: {}",
            connection_id,
            e
        );
    } else {
        session.activate();
        tracing::debug!("Connection '{}' is {:?}", connection_id, session.state());

        let mut send_task = pusher_loop(connection_id, attached.outbox, sender);
        let mut recv_task = reader_loop(connection_id, receiver, state.clone());

        // If any one of the tasks completes, abort the other
        tokio::select! {
            _ = &mut recv_task => send_task.abort(),
            _ = &mut send_task => recv_task.abort(),
        };
    }

    if session.close() {
        state
            .disconnect_session_usecase
            .execute(session.id())
            .await;
    }
    tracing::info!("Connection '{}' closed", connection_id);
}
