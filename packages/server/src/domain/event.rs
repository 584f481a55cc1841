//! Domain events: transient, enriched payloads that exist only for the
//! duration of a dispatch.

use serde_json::Value;

use super::{
    entity::Identity,
    value_object::{ConnectionId, RoomId, Timestamp, UserId},
};

/// Who caused an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// A client connection with a bound identity
    User {
        identity: Identity,
        connection_id: ConnectionId,
    },
    /// The server itself (e.g. a notification pushed over HTTP)
    System,
}

impl Origin {
    /// The connection that triggered the event, if any
    pub fn connection_id(&self) -> Option<&ConnectionId> {
        match self {
            Origin::User { connection_id, .. } => Some(connection_id),
            Origin::System => None,
        }
    }
}

/// Where an event goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Every connection subscribed to the room
    Room(RoomId),
    /// Every connection bound to the identity, joined rooms or not
    User(UserId),
    /// A single connection (direct replies such as `init_success`)
    Connection(ConnectionId),
}

/// Whether the triggering connection also receives the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    IncludeSender,
    /// Only the triggering connection is skipped, not the whole identity
    ExcludeSender,
}

/// Outbound event vocabulary across all namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    InitSuccess,
    RoomJoined,
    UserJoined,
    UserLeft,
    ReceiveMessage,
    ReceiveMediaMessage,
    UserTyping,
    MessageReaction,
    MessageDeleted,
    MessageEdited,
    MessageRead,
    TermStatusChanged,
    TermContentChanged,
    ContractStatusChanged,
    NewDealRequest,
    DealAccepted,
    DealRejected,
    NewNotification,
}

impl EventKind {
    /// Event name on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::InitSuccess => "init_success",
            EventKind::RoomJoined => "room_joined",
            EventKind::UserJoined => "user_joined",
            EventKind::UserLeft => "user_left",
            EventKind::ReceiveMessage => "receive_message",
            EventKind::ReceiveMediaMessage => "receive_media_message",
            EventKind::UserTyping => "user_typing",
            EventKind::MessageReaction => "message_reaction",
            EventKind::MessageDeleted => "message_deleted",
            EventKind::MessageEdited => "message_edited",
            EventKind::MessageRead => "message_read",
            EventKind::TermStatusChanged => "term_status_changed",
            EventKind::TermContentChanged => "term_content_changed",
            EventKind::ContractStatusChanged => "contract_status_changed",
            EventKind::NewDealRequest => "new_deal_request",
            EventKind::DealAccepted => "deal_accepted",
            EventKind::DealRejected => "deal_rejected",
            EventKind::NewNotification => "new_notification",
        }
    }
}

/// A tagged payload enriched with its origin and a server timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainEvent {
    pub origin: Origin,
    pub target: Target,
    pub delivery: Delivery,
    pub kind: EventKind,
    pub body: Value,
    pub timestamp: Timestamp,
}

impl DomainEvent {
    /// The connection to skip during fan-out, if any
    pub fn excluded_connection(&self) -> Option<&ConnectionId> {
        match self.delivery {
            Delivery::IncludeSender => None,
            Delivery::ExcludeSender => self.origin.connection_id(),
        }
    }
}

/// What an inbound domain event asks the namespace to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Join(RoomId),
    Leave(RoomId),
    Publish(DomainEvent),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Username;

    fn user_origin() -> Origin {
        Origin::User {
            identity: Identity::new(
                UserId::new("U1".to_string()).unwrap(),
                Username::new("alice".to_string()).unwrap(),
            ),
            connection_id: ConnectionId::new("conn-1".to_string()).unwrap(),
        }
    }

    fn event(origin: Origin, delivery: Delivery) -> DomainEvent {
        DomainEvent {
            origin,
            target: Target::Room(RoomId::new("room-42".to_string()).unwrap()),
            delivery,
            kind: EventKind::UserTyping,
            body: Value::Null,
            timestamp: Timestamp::new(0),
        }
    }

    #[test]
    fn test_exclude_sender_skips_origin_connection() {
        // テスト項目: ExcludeSender の場合、送信元の接続が除外対象になる
        // when (操作):
        let event = event(user_origin(), Delivery::ExcludeSender);

        // then (期待する結果):
        assert_eq!(
            event.excluded_connection().map(|c| c.as_str()),
            Some("conn-1")
        );
    }

    #[test]
    fn test_include_sender_excludes_nobody() {
        // テスト項目: IncludeSender の場合、除外対象はない
        // when (操作):
        let event = event(user_origin(), Delivery::IncludeSender);

        // then (期待する結果):
        assert!(event.excluded_connection().is_none());
    }

    #[test]
    fn test_system_origin_excludes_nobody() {
        // テスト項目: システム発の通知は ExcludeSender でも誰も除外しない
        // when (操作):
        let event = event(Origin::System, Delivery::ExcludeSender);

        // then (期待する結果):
        assert!(event.excluded_connection().is_none());
    }
}
