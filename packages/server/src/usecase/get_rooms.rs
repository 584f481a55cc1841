//! UseCase: ルーム一覧・詳細の取得（HTTP API 向け）

use std::sync::Arc;

use crate::domain::{PresenceRepository, RoomId, RoomSnapshot};

use super::error::GetRoomDetailError;

/// ルーム一覧取得のユースケース
pub struct GetRoomsUseCase {
    repository: Arc<dyn PresenceRepository>,
}

impl GetRoomsUseCase {
    pub fn new(repository: Arc<dyn PresenceRepository>) -> Self {
        Self { repository }
    }

    /// 全ルームのスナップショット（ルーム ID 順）
    pub async fn execute(&self) -> Vec<RoomSnapshot> {
        self.repository.get_rooms().await
    }

    /// 接続数
    pub async fn count_connections(&self) -> usize {
        self.repository.count_connections().await
    }

    /// ルーム数（スナップショットを作らない）
    pub async fn count_rooms(&self) -> usize {
        self.repository.count_rooms().await
    }
}

/// ルーム詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    repository: Arc<dyn PresenceRepository>,
}

impl GetRoomDetailUseCase {
    pub fn new(repository: Arc<dyn PresenceRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, room_id: String) -> Result<RoomSnapshot, GetRoomDetailError> {
        let room_id = RoomId::new(room_id.clone())
            .map_err(|_| GetRoomDetailError::InvalidRoomId(room_id))?;
        self.repository
            .get_room(&room_id)
            .await
            .ok_or(GetRoomDetailError::RoomNotFound)
    }
}
