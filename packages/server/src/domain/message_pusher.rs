//! MessagePusher trait 定義
//!
//! 接続へのイベント送信（トランスポート層）の抽象化。
//! 送信は fire-and-forget で、完了を待たない。

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc;

use super::{ConnectionId, EventKind, MessagePushError};

/// Outbound channel of one connection (already-encoded frames)
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Per-dispatch delivery summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    pub delivered: usize,
    pub failed: usize,
}

/// Transport abstraction used by the Fan-out Dispatcher.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続の送信チャンネルを登録
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続の送信チャンネルを登録解除
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// 1つの接続に送信
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        kind: EventKind,
        body: &Value,
    ) -> Result<(), MessagePushError>;

    /// 複数の接続に送信。1つの接続の失敗は他の接続への送信を妨げない
    async fn broadcast(
        &self,
        targets: &[ConnectionId],
        kind: EventKind,
        body: &Value,
    ) -> BroadcastReport;
}
