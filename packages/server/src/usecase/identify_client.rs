//! UseCase: アイデンティティの紐付け（`init_user`）

use std::sync::Arc;

use crate::domain::{ConnectionId, Identity, PresenceRepository, RegistryError};

use super::error::IdentifyError;

/// アイデンティティ紐付けのユースケース
pub struct IdentifyClientUseCase {
    repository: Arc<dyn PresenceRepository>,
}

impl IdentifyClientUseCase {
    pub fn new(repository: Arc<dyn PresenceRepository>) -> Self {
        Self { repository }
    }

    /// 接続にアイデンティティを紐付ける
    ///
    /// # Returns
    ///
    /// * `Ok(Identity)` - 紐付け成功
    /// * `Err(IdentifyError)` - 接続が既に存在しない、または紐付け済み
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        identity: Identity,
    ) -> Result<Identity, IdentifyError> {
        match self.repository.identify(connection_id, identity.clone()).await {
            Ok(()) => Ok(identity),
            Err(RegistryError::AlreadyIdentified { connection_id, .. }) => {
                Err(IdentifyError::AlreadyIdentified(connection_id))
            }
            Err(e) => Err(IdentifyError::UnknownConnection(e.to_string())),
        }
    }
}
