//! WebSocket connection handler.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message as WsMessage, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{ui::state::AppState, usecase::IngestError};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that drains the connection's outbound channel into
/// the socket. Ends when the channel closes or a send fails.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, WsMessage>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(payload) = rx.recv().await {
            if sender.send(WsMessage::Text(payload.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    // Register first so no broadcast is missed, but write the welcome
    // frame directly on the sink: the pusher task starts draining the
    // channel only afterwards, so the welcome always hits the wire
    // before any broadcast.
    let (tx, rx) = mpsc::unbounded_channel();
    let connection_id = state.registry.register(tx.clone()).await;

    let welcome = serde_json::json!({
        "system": format!("connected to instance {}", state.instance_id),
        "pid": state.instance_id,
    });
    if let Err(e) = sender
        .send(WsMessage::Text(welcome.to_string().into()))
        .await
    {
        tracing::error!("failed to send welcome frame: {}", e);
        state.registry.unregister(&connection_id).await;
        return;
    }
    tracing::info!("connection {} established", connection_id);

    let state_clone = state.clone();
    let error_tx = tx;
    let mut recv_task = tokio::spawn(async move {
        while let Some(frame) = receiver.next().await {
            let frame = match frame {
                Ok(frame) => frame,
                Err(e) => {
                    tracing::error!("websocket error: {}", e);
                    break;
                }
            };

            match frame {
                WsMessage::Text(text) => {
                    match state_clone
                        .ingest_message_usecase
                        .execute(text.as_str())
                        .await
                    {
                        Ok(_) => {
                            // The sender gets the message back via the
                            // broadcast like any other connected client.
                        }
                        Err(IngestError::Validation(e)) => {
                            // Inline error reply; the connection stays open.
                            let reply =
                                serde_json::json!({ "error": e.to_string() }).to_string();
                            if error_tx.send(reply).is_err() {
                                break;
                            }
                        }
                        Err(IngestError::Store(e)) => {
                            // The frame fails visibly in the log; keep
                            // accepting further frames.
                            tracing::error!("failed to persist inbound frame: {}", e);
                        }
                    }
                }
                WsMessage::Close(_) => {
                    tracing::info!("client requested close");
                    break;
                }
                _ => {}
            }
        }
    });

    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state.registry.unregister(&connection_id).await;
    tracing::info!("connection {} disconnected and unregistered", connection_id);
}
