//! UseCase: ルーム参加
//!
//! ルームは参加によって暗黙的に作成されます。

use std::sync::Arc;

use crate::domain::{ConnectionId, JoinOutcome, PresenceRepository, RegistryError, RoomId};

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    repository: Arc<dyn PresenceRepository>,
}

impl JoinRoomUseCase {
    pub fn new(repository: Arc<dyn PresenceRepository>) -> Self {
        Self { repository }
    }

    /// ルーム参加を実行
    ///
    /// # Returns
    ///
    /// * `Ok(JoinOutcome)` - 参加後のメンバー一覧を含む
    /// * `Err(RegistryError)` - 接続が存在しない、または匿名
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        room_id: &RoomId,
    ) -> Result<JoinOutcome, RegistryError> {
        self.repository.join(room_id, connection_id).await
    }
}
