//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Path, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::ui::{namespace::NamespaceChannel, state::AppState};

/// `GET /ws/{namespace}`
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(namespace): Path<String>,
) -> Result<impl IntoResponse, StatusCode> {
    let Some(channel) = state.channel(&namespace) else {
        tracing::warn!("Unknown namespace '{}'", namespace);
        return Err(StatusCode::NOT_FOUND);
    };

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, channel)))
}

/// Spawns a task that forwards frames from the rx channel to the WebSocket sink.
///
/// # Arguments
///
/// * `rx` - Frames dispatched to this connection
/// * `sender` - WebSocket sink of this connection
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, channel: Arc<NamespaceChannel>) {
    let (sender, mut receiver) = socket.split();

    let (tx, rx) = mpsc::unbounded_channel();
    let connection_id = match channel.connect(tx).await {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("[{}] Failed to register connection: {}", channel.kind(), e);
            return;
        }
    };

    let recv_channel = channel.clone();
    let recv_connection_id = connection_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("[{}] Received: {}", recv_channel.kind(), text);
                    // フレーム単位のエラーはクライアントに返さず破棄する
                    if let Err(e) = recv_channel
                        .handle_frame(&recv_connection_id, text.as_str())
                        .await
                    {
                        tracing::warn!(
                            "[{}] Dropped frame from '{}': {}",
                            recv_channel.kind(),
                            recv_connection_id,
                            e
                        );
                    }
                }
                Message::Binary(_) => {
                    tracing::warn!("[{}] Ignoring binary frame", recv_channel.kind());
                }
                Message::Close(_) => {
                    tracing::info!(
                        "[{}] Connection '{}' requested close",
                        recv_channel.kind(),
                        recv_connection_id
                    );
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

    channel.disconnect(&connection_id).await;
}
