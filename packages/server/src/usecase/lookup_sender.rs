//! UseCase: 送信者の確認
//!
//! ドメインイベントを送信できるのはアイデンティティが紐付いた接続のみです。

use std::sync::Arc;

use crate::domain::{ConnectionId, Identity, PresenceRepository, RegistryError};

pub struct LookupSenderUseCase {
    repository: Arc<dyn PresenceRepository>,
}

impl LookupSenderUseCase {
    pub fn new(repository: Arc<dyn PresenceRepository>) -> Self {
        Self { repository }
    }

    /// # Errors
    ///
    /// * `RegistryError::UnknownConnection` - 接続が既に存在しない
    /// * `RegistryError::UnidentifiedSender` - `init_user` が未受信
    pub async fn execute(&self, connection_id: &ConnectionId) -> Result<Identity, RegistryError> {
        self.repository.sender(connection_id).await
    }
}
