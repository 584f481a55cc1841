//! UseCase: 接続処理
//!
//! トランスポート接続時に匿名の接続レコードを作成し、送信チャンネルを登録します。

use std::sync::Arc;

use sponsorlink_shared::time::Clock;

use crate::domain::{
    Connection, ConnectionId, MessagePusher, PresenceRepository, PusherChannel, Timestamp,
};

/// 接続のユースケース
pub struct ConnectClientUseCase {
    repository: Arc<dyn PresenceRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl ConnectClientUseCase {
    pub fn new(
        repository: Arc<dyn PresenceRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            clock,
        }
    }

    /// 接続を登録
    ///
    /// # Arguments
    ///
    /// * `connection_id` - サーバーが割り当てた接続 ID
    /// * `sender` - 接続へのフレーム送信用チャンネル
    pub async fn execute(&self, connection_id: ConnectionId, sender: PusherChannel) -> Connection {
        let connected_at = Timestamp::new(self.clock.now_millis());

        // 先に送信チャンネルを登録し、登録直後の返信が失われないようにする
        self.message_pusher
            .register_client(connection_id.clone(), sender)
            .await;
        self.repository.register(connection_id, connected_at).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::MockMessagePusher, infrastructure::repository::InMemoryPresenceRepository,
    };
    use sponsorlink_shared::time::FixedClock;

    #[tokio::test]
    async fn test_connect_registers_anonymous_connection() {
        // テスト項目: 接続すると匿名の接続が登録され、送信チャンネルも登録される
        // given (前提条件):
        let repository = Arc::new(InMemoryPresenceRepository::default());
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_register_client()
            .withf(|id, _| id.as_str() == "c1")
            .times(1)
            .return_const(());
        let usecase = ConnectClientUseCase::new(
            repository.clone(),
            Arc::new(pusher),
            Arc::new(FixedClock::new(5000)),
        );

        // when (操作):
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        let connection = usecase
            .execute(ConnectionId::new("c1".to_string()).unwrap(), tx)
            .await;

        // then (期待する結果):
        assert!(!connection.is_identified());
        assert_eq!(connection.connected_at, Timestamp::new(5000));
        assert_eq!(repository.count_connections().await, 1);
    }
}
