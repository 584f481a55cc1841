//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` を管理
//! - イベントを `{"event", "data"}` フレームにエンコードして送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、フレームの送信に使用します。
//! 送信はチャンネルへの投入のみで、受信側の遅延が送信元をブロックすることはありません。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{
    domain::{BroadcastReport, ConnectionId, EventKind, MessagePushError, MessagePusher, PusherChannel},
    infrastructure::dto::websocket::OutboundEnvelope,
};

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let clients = Arc::new(Mutex::new(HashMap::new()));
/// let pusher = WebSocketMessagePusher::new(clients.clone());
///
/// pusher.push_to(&connection_id, EventKind::InitSuccess, &body).await?;
/// ```
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの WebSocket sender
    ///
    /// Key: ConnectionId
    /// Value: PusherChannel
    clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new(clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>) -> Self {
        Self { clients }
    }

    fn encode(kind: EventKind, body: &Value) -> Result<String, MessagePushError> {
        serde_json::to_string(&OutboundEnvelope {
            event: kind.as_str(),
            data: body,
        })
        .map_err(|e| MessagePushError::PushFailed(e.to_string()))
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(HashMap::new())))
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        tracing::debug!("Connection '{}' registered to MessagePusher", connection_id);
        clients.insert(connection_id, sender);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        clients.remove(connection_id);
        tracing::debug!("Connection '{}' unregistered from MessagePusher", connection_id);
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        kind: EventKind,
        body: &Value,
    ) -> Result<(), MessagePushError> {
        let frame = Self::encode(kind, body)?;
        let clients = self.clients.lock().await;

        let sender = clients
            .get(connection_id)
            .ok_or_else(|| MessagePushError::ClientNotFound(connection_id.to_string()))?;
        sender
            .send(frame)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed '{}' to connection '{}'", kind.as_str(), connection_id);
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: &[ConnectionId],
        kind: EventKind,
        body: &Value,
    ) -> BroadcastReport {
        let mut report = BroadcastReport::default();
        if targets.is_empty() {
            return report;
        }

        let frame = match Self::encode(kind, body) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::warn!("Failed to encode '{}': {}", kind.as_str(), e);
                report.failed = targets.len();
                return report;
            }
        };

        let clients = self.clients.lock().await;
        for target in targets {
            // ブロードキャストでは一部の送信失敗を許容
            match clients.get(target) {
                Some(sender) => match sender.send(frame.clone()) {
                    Ok(()) => {
                        report.delivered += 1;
                        tracing::debug!("Broadcasted '{}' to connection '{}'", kind.as_str(), target);
                    }
                    Err(e) => {
                        report.failed += 1;
                        tracing::warn!("Failed to push '{}' to connection '{}': {}", kind.as_str(), target, e);
                    }
                },
                None => {
                    report.failed += 1;
                    tracing::warn!("Connection '{}' not found during broadcast, skipping", target);
                }
            }
        }

        report
    }
}
