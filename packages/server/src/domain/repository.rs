//! Repository trait 定義
//!
//! ドメイン層が必要とするプレゼンス状態へのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! 実装は全ての変更操作を直列化し、`resolve` は一貫したスナップショットを
//! 返さなければなりません。

use async_trait::async_trait;

use super::{
    Connection, ConnectionId, Departure, Identity, JoinOutcome, RegistryError, RoomId,
    RoomSnapshot, Target, Timestamp, UserId,
};

/// Presence Repository trait
///
/// Connection Registry と Room Membership Index をまとめて扱う。
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
#[async_trait]
pub trait PresenceRepository: Send + Sync {
    /// 匿名の接続を登録
    async fn register(&self, connection_id: ConnectionId, connected_at: Timestamp) -> Connection;

    /// 接続にアイデンティティを紐付ける
    async fn identify(
        &self,
        connection_id: &ConnectionId,
        identity: Identity,
    ) -> Result<(), RegistryError>;

    /// 接続を取得
    async fn lookup(&self, connection_id: &ConnectionId) -> Option<Connection>;

    /// ドメインイベントを送信できる接続のアイデンティティを取得
    async fn sender(&self, connection_id: &ConnectionId) -> Result<Identity, RegistryError>;

    /// アイデンティティに紐付く全ての接続を取得
    async fn connections_for(&self, user_id: &UserId) -> Vec<ConnectionId>;

    /// ルームに参加
    async fn join(
        &self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
    ) -> Result<JoinOutcome, RegistryError>;

    /// ルームから退出
    async fn leave(
        &self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
    ) -> Result<Option<Identity>, RegistryError>;

    /// 接続を削除し、参加していた全ルームから外す（冪等）
    async fn unregister(&self, connection_id: &ConnectionId) -> Option<Departure>;

    /// 配信先を接続 ID のリストに解決
    async fn resolve(&self, target: &Target) -> Vec<ConnectionId>;

    /// ルームのメンバー一覧（スナップショット）
    async fn members_of(&self, room_id: &RoomId) -> Vec<Identity>;

    /// ルームのスナップショット
    async fn get_room(&self, room_id: &RoomId) -> Option<RoomSnapshot>;

    /// 全ルームのスナップショット
    async fn get_rooms(&self) -> Vec<RoomSnapshot>;

    /// 接続数
    async fn count_connections(&self) -> usize;

    /// ルーム数
    async fn count_rooms(&self) -> usize;
}
