//! InMemory Presence Repository 実装
//!
//! ドメイン層が定義する PresenceRepository trait の具体的な実装。
//! `Presence` 集約を 1 つの Mutex で保護し、全ての変更操作を直列化します。
//!
//! 永続化やプロセス間の複製は行いません。複数インスタンス構成には
//! 外部ブローカーが必要です。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    Connection, ConnectionId, Departure, Identity, JoinOutcome, Presence, PresenceRepository,
    RegistryError, RoomId, RoomSnapshot, Target, Timestamp, UserId,
};

/// インメモリ Presence Repository 実装
pub struct InMemoryPresenceRepository {
    presence: Arc<Mutex<Presence>>,
}

impl InMemoryPresenceRepository {
    /// 新しい InMemoryPresenceRepository を作成
    pub fn new(presence: Arc<Mutex<Presence>>) -> Self {
        Self { presence }
    }
}

impl Default for InMemoryPresenceRepository {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(Presence::new())))
    }
}

#[async_trait]
impl PresenceRepository for InMemoryPresenceRepository {
    async fn register(&self, connection_id: ConnectionId, connected_at: Timestamp) -> Connection {
        let mut presence = self.presence.lock().await;
        presence.register(connection_id, connected_at)
    }

    async fn identify(
        &self,
        connection_id: &ConnectionId,
        identity: Identity,
    ) -> Result<(), RegistryError> {
        let mut presence = self.presence.lock().await;
        presence.identify(connection_id, identity)
    }

    async fn lookup(&self, connection_id: &ConnectionId) -> Option<Connection> {
        let presence = self.presence.lock().await;
        presence.lookup(connection_id).cloned()
    }

    async fn sender(&self, connection_id: &ConnectionId) -> Result<Identity, RegistryError> {
        let presence = self.presence.lock().await;
        presence.sender(connection_id).cloned()
    }

    async fn connections_for(&self, user_id: &UserId) -> Vec<ConnectionId> {
        let presence = self.presence.lock().await;
        presence.connections_for(user_id)
    }

    async fn join(
        &self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
    ) -> Result<JoinOutcome, RegistryError> {
        let mut presence = self.presence.lock().await;
        presence.join(room_id, connection_id)
    }

    async fn leave(
        &self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
    ) -> Result<Option<Identity>, RegistryError> {
        let mut presence = self.presence.lock().await;
        presence.leave(room_id, connection_id)
    }

    async fn unregister(&self, connection_id: &ConnectionId) -> Option<Departure> {
        let mut presence = self.presence.lock().await;
        presence.disconnect(connection_id)
    }

    async fn resolve(&self, target: &Target) -> Vec<ConnectionId> {
        let presence = self.presence.lock().await;
        presence.resolve(target)
    }

    async fn members_of(&self, room_id: &RoomId) -> Vec<Identity> {
        let presence = self.presence.lock().await;
        presence.members_of(room_id)
    }

    async fn get_room(&self, room_id: &RoomId) -> Option<RoomSnapshot> {
        let presence = self.presence.lock().await;
        presence.room(room_id)
    }

    async fn get_rooms(&self) -> Vec<RoomSnapshot> {
        let presence = self.presence.lock().await;
        presence.rooms()
    }

    async fn count_connections(&self) -> usize {
        let presence = self.presence.lock().await;
        presence.connection_count()
    }

    async fn count_rooms(&self) -> usize {
        let presence = self.presence.lock().await;
        presence.room_count()
    }
}
