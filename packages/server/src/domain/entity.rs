//! Core domain models for the presence layer.

use std::collections::BTreeSet;

use serde::Serialize;

use super::value_object::{ConnectionId, RoomId, Timestamp, UserId, Username};

/// The authenticated user bound to a connection after `init_user`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Identity {
    pub user_id: UserId,
    pub username: Username,
}

impl Identity {
    /// Create a new identity
    pub fn new(user_id: UserId, username: Username) -> Self {
        Self { user_id, username }
    }
}

/// One live transport session.
///
/// Created on connect, identified once, destroyed on disconnect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub id: ConnectionId,
    /// Absent until `init_user` is received
    pub identity: Option<Identity>,
    /// Rooms this connection currently occupies
    pub joined_rooms: BTreeSet<RoomId>,
    pub connected_at: Timestamp,
}

impl Connection {
    /// Create a new anonymous connection
    pub fn new(id: ConnectionId, connected_at: Timestamp) -> Self {
        Self {
            id,
            identity: None,
            joined_rooms: BTreeSet::new(),
            connected_at,
        }
    }

    pub fn is_identified(&self) -> bool {
        self.identity.is_some()
    }
}

/// A member of a room as seen in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomMember {
    pub identity: Identity,
    /// Number of this identity's connections subscribed to the room
    pub connections: usize,
}

/// Point-in-time copy of a room's membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSnapshot {
    pub id: RoomId,
    pub members: Vec<RoomMember>,
}

/// Result of a join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    pub room: RoomId,
    pub identity: Identity,
    /// Members after the join, sorted by user id
    pub members: Vec<Identity>,
    /// `false` when the connection was already in the room
    pub newly_joined: bool,
}

/// What a disconnect removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    pub connection: Connection,
    /// Rooms the connection had joined, now without it
    pub rooms: Vec<RoomId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_connection_is_anonymous() {
        // テスト項目: 新しい接続は匿名でルームに参加していない
        // given (前提条件):
        let id = ConnectionId::new("conn-1".to_string()).unwrap();

        // when (操作):
        let connection = Connection::new(id, Timestamp::new(1000));

        // then (期待する結果):
        assert!(!connection.is_identified());
        assert!(connection.joined_rooms.is_empty());
        assert_eq!(connection.connected_at.value(), 1000);
    }
}
