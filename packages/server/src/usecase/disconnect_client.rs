//! UseCase: 切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectClientUseCase::execute() メソッド
//! - 切断時に Registry と Membership Index の両方から接続が削除されること
//!
//! ### なぜこのテストが必要か
//! - 切断は 1 接続につき 1 回だけ処理され、二度目は何もしない（冪等）
//! - 空になったルームが残らないことを保証する

use std::sync::Arc;

use crate::domain::{ConnectionId, Departure, MessagePusher, PresenceRepository};

/// 切断のユースケース
pub struct DisconnectClientUseCase {
    repository: Arc<dyn PresenceRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectClientUseCase {
    pub fn new(
        repository: Arc<dyn PresenceRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 切断を実行
    ///
    /// # Returns
    ///
    /// * `Some(Departure)` - 削除された接続と、退出したルームの一覧
    /// * `None` - 既に切断済み
    pub async fn execute(&self, connection_id: &ConnectionId) -> Option<Departure> {
        let departure = self.repository.unregister(connection_id).await;
        self.message_pusher.unregister_client(connection_id).await;
        departure
    }
}
