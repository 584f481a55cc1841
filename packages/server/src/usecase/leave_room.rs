//! UseCase: ルーム退出

use std::sync::Arc;

use crate::domain::{ConnectionId, Identity, PresenceRepository, RegistryError, RoomId};

/// ルーム退出のユースケース
pub struct LeaveRoomUseCase {
    repository: Arc<dyn PresenceRepository>,
}

impl LeaveRoomUseCase {
    pub fn new(repository: Arc<dyn PresenceRepository>) -> Self {
        Self { repository }
    }

    /// ルーム退出を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Identity))` - 退出した
    /// * `Ok(None)` - 参加していなかった
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        room_id: &RoomId,
    ) -> Result<Option<Identity>, RegistryError> {
        self.repository.leave(room_id, connection_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{Timestamp, UserId, Username},
        infrastructure::repository::InMemoryPresenceRepository,
    };

    #[tokio::test]
    async fn test_leave_last_member_deletes_room() {
        // テスト項目: 最後のメンバーが退出するとルームが削除される
        // given (前提条件):
        let repository = Arc::new(InMemoryPresenceRepository::default());
        let c1 = ConnectionId::new("c1".to_string()).unwrap();
        repository.register(c1.clone(), Timestamp::new(0)).await;
        let u1 = Identity::new(
            UserId::new("U1".to_string()).unwrap(),
            Username::new("alice".to_string()).unwrap(),
        );
        repository.identify(&c1, u1.clone()).await.unwrap();
        let room = RoomId::new("room-42".to_string()).unwrap();
        repository.join(&room, &c1).await.unwrap();
        let usecase = LeaveRoomUseCase::new(repository.clone());

        // when (操作):
        let result = usecase.execute(&c1, &room).await;

        // then (期待する結果):
        assert_eq!(result, Ok(Some(u1)));
        assert!(repository.members_of(&room).await.is_empty());
        assert!(repository.get_room(&room).await.is_none());
    }
}
