//! Chat namespace: room messages, media, typing, reactions, edits and read receipts.

use serde_json::Value;

use super::{EventContext, EventRouter, RouteError, encode, parse};
use crate::{
    domain::{Command, Delivery, EventKind, MessageIdFactory, NamespaceKind, RoomId, Target},
    infrastructure::dto::websocket::chat::{
        EditMessagePayload, MediaMessagePayload, MessageDeleted, MessageEdited, MessageReaction,
        MessageRead, MessageRefPayload, NewMessagePayload, ReactionPayload, ReceiveMediaMessage,
        ReceiveMessage, RoomRef, SendMessagePayload, TypingPayload, UserTyping,
    },
};

pub struct ChatRouter;

impl ChatRouter {
    fn message(
        &self,
        room_id: String,
        content: String,
        ctx: &EventContext<'_>,
    ) -> Result<Command, RouteError> {
        let room = RoomId::new(room_id)?;
        let body = encode(&ReceiveMessage {
            id: MessageIdFactory::generate(),
            room_id: room.as_str().to_string(),
            content,
            user_id: ctx.sender_id(),
            username: ctx.sender_name(),
            created_at: ctx.timestamp(),
        })?;
        Ok(ctx.publish(
            Target::Room(room),
            Delivery::IncludeSender,
            EventKind::ReceiveMessage,
            body,
        ))
    }

    fn typing(
        &self,
        event: &str,
        data: Value,
        is_typing: bool,
        ctx: &EventContext<'_>,
    ) -> Result<Command, RouteError> {
        let payload: TypingPayload = parse(event, data)?;
        let room = RoomId::new(payload.room_id.into_string())?;
        let body = encode(&UserTyping {
            user_id: ctx.sender_id(),
            username: ctx.sender_name(),
            room_id: room.as_str().to_string(),
            is_typing,
        })?;
        Ok(ctx.publish(
            Target::Room(room),
            Delivery::ExcludeSender,
            EventKind::UserTyping,
            body,
        ))
    }
}

impl EventRouter for ChatRouter {
    fn namespace(&self) -> NamespaceKind {
        NamespaceKind::Chat
    }

    fn route(
        &self,
        event: &str,
        data: Value,
        ctx: &EventContext<'_>,
    ) -> Result<Command, RouteError> {
        match event {
            "join_room" => {
                let room: RoomRef = parse(event, data)?;
                Ok(Command::Join(RoomId::new(room.into_string())?))
            }
            "leave_room" => {
                let room: RoomRef = parse(event, data)?;
                Ok(Command::Leave(RoomId::new(room.into_string())?))
            }
            "send_message" => {
                let payload: SendMessagePayload = parse(event, data)?;
                self.message(payload.room_id.into_string(), payload.message, ctx)
            }
            "new_message" => {
                let payload: NewMessagePayload = parse(event, data)?;
                self.message(payload.room_id.into_string(), payload.content, ctx)
            }
            "new_message_with_media" => {
                let payload: MediaMessagePayload = parse(event, data)?;
                let room = RoomId::new(payload.room_id.into_string())?;
                let body = encode(&ReceiveMediaMessage {
                    id: MessageIdFactory::generate(),
                    room_id: room.as_str().to_string(),
                    content: payload.content,
                    media_url: payload.media_url,
                    media_type: payload.media_type,
                    user_id: ctx.sender_id(),
                    username: ctx.sender_name(),
                    created_at: ctx.timestamp(),
                })?;
                Ok(ctx.publish(
                    Target::Room(room),
                    Delivery::IncludeSender,
                    EventKind::ReceiveMediaMessage,
                    body,
                ))
            }
            "typing" | "typing_start" => self.typing(event, data, true, ctx),
            "typing_end" => self.typing(event, data, false, ctx),
            "add_reaction" => {
                let payload: ReactionPayload = parse(event, data)?;
                let room = RoomId::new(payload.room_id.into_string())?;
                let body = encode(&MessageReaction {
                    room_id: room.as_str().to_string(),
                    message_id: payload.message_id.into_string(),
                    reaction: payload.reaction,
                    user_id: ctx.sender_id(),
                    username: ctx.sender_name(),
                    timestamp: ctx.timestamp(),
                })?;
                Ok(ctx.publish(
                    Target::Room(room),
                    Delivery::IncludeSender,
                    EventKind::MessageReaction,
                    body,
                ))
            }
            "delete_message" => {
                let payload: MessageRefPayload = parse(event, data)?;
                let room = RoomId::new(payload.room_id.into_string())?;
                let body = encode(&MessageDeleted {
                    room_id: room.as_str().to_string(),
                    message_id: payload.message_id.into_string(),
                    deleted_by: ctx.sender_id(),
                    timestamp: ctx.timestamp(),
                })?;
                Ok(ctx.publish(
                    Target::Room(room),
                    Delivery::IncludeSender,
                    EventKind::MessageDeleted,
                    body,
                ))
            }
            "edit_message" => {
                let payload: EditMessagePayload = parse(event, data)?;
                let room = RoomId::new(payload.room_id.into_string())?;
                let body = encode(&MessageEdited {
                    room_id: room.as_str().to_string(),
                    message_id: payload.message_id.into_string(),
                    new_content: payload.new_content,
                    edited_by: ctx.sender_id(),
                    timestamp: ctx.timestamp(),
                })?;
                Ok(ctx.publish(
                    Target::Room(room),
                    Delivery::IncludeSender,
                    EventKind::MessageEdited,
                    body,
                ))
            }
            "mark_read" => {
                let payload: MessageRefPayload = parse(event, data)?;
                let room = RoomId::new(payload.room_id.into_string())?;
                let body = encode(&MessageRead {
                    room_id: room.as_str().to_string(),
                    message_id: payload.message_id.into_string(),
                    user_id: ctx.sender_id(),
                    read_at: ctx.timestamp(),
                })?;
                // 既読は本人以外に通知する
                Ok(ctx.publish(
                    Target::Room(room),
                    Delivery::ExcludeSender,
                    EventKind::MessageRead,
                    body,
                ))
            }
            other => Err(RouteError::UnknownEvent(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::domain::{ConnectionId, Identity, Timestamp};
    use serde_json::json;

    struct Sender {
        connection_id: ConnectionId,
        identity: Identity,
    }

    impl Sender {
        fn u1() -> Self {
            Self {
                connection_id: conn("c1"),
                identity: identity("U1", "alice"),
            }
        }

        fn ctx(&self) -> EventContext<'_> {
            EventContext {
                connection_id: &self.connection_id,
                sender: &self.identity,
                now: Timestamp::new(1672531200123),
            }
        }
    }

    fn room(id: &str) -> RoomId {
        RoomId::new(id.to_string()).unwrap()
    }

    #[test]
    fn test_join_room_accepts_bare_and_object_forms() {
        // テスト項目: join_room はルーム ID 単体と {roomId, userId} の両方を受け付ける
        // given (前提条件):
        let sender = Sender::u1();

        // when (操作):
        let bare = ChatRouter.route("join_room", json!(42), &sender.ctx()).unwrap();
        let object = ChatRouter
            .route("join_room", json!({"roomId": "room-42", "userId": "U9"}), &sender.ctx())
            .unwrap();

        // then (期待する結果):
        assert_eq!(bare, Command::Join(room("42")));
        assert_eq!(object, Command::Join(room("room-42")));
    }

    #[test]
    fn test_send_message_uses_bound_identity() {
        // テスト項目: send_message の送信者はペイロードの userId ではなく紐付け済みのアイデンティティになる
        // given (前提条件):
        let sender = Sender::u1();

        // when (操作):
        let event = published(
            ChatRouter
                .route(
                    "send_message",
                    json!({"roomId": "room-42", "message": "hi", "userId": "U9"}),
                    &sender.ctx(),
                )
                .unwrap(),
        );

        // then (期待する結果):
        assert_eq!(event.kind, EventKind::ReceiveMessage);
        assert_eq!(event.target, Target::Room(room("room-42")));
        assert_eq!(event.delivery, Delivery::IncludeSender);
        assert_eq!(event.body["content"], "hi");
        assert_eq!(event.body["UserId"], "U1");
        assert_eq!(event.body["username"], "alice");
        assert_eq!(event.body["created_at"], "2023-01-01T00:00:00.123Z");
        assert!(!event.body["id"].as_str().unwrap().is_empty());
    }

    #[test]
    fn test_typing_excludes_sender() {
        // テスト項目: typing_start / typing_end は送信者を除外して配信される
        // given (前提条件):
        let sender = Sender::u1();

        // when (操作):
        let start = published(
            ChatRouter
                .route("typing_start", json!({"roomId": "room-42"}), &sender.ctx())
                .unwrap(),
        );
        let end = published(
            ChatRouter
                .route("typing_end", json!({"roomId": "room-42"}), &sender.ctx())
                .unwrap(),
        );

        // then (期待する結果):
        assert_eq!(start.delivery, Delivery::ExcludeSender);
        assert_eq!(start.excluded_connection(), Some(&conn("c1")));
        assert_eq!(start.body["isTyping"], true);
        assert_eq!(start.body["userId"], "U1");
        assert_eq!(end.body["isTyping"], false);
    }

    #[test]
    fn test_edit_and_reaction_include_sender() {
        // テスト項目: 編集とリアクションは送信者を含めてルームに配信される
        // given (前提条件):
        let sender = Sender::u1();

        // when (操作):
        let edited = published(
            ChatRouter
                .route(
                    "edit_message",
                    json!({"roomId": "room-42", "messageId": 7, "newContent": "fixed"}),
                    &sender.ctx(),
                )
                .unwrap(),
        );
        let reaction = published(
            ChatRouter
                .route(
                    "add_reaction",
                    json!({"roomId": "room-42", "messageId": "m1", "reaction": "+1"}),
                    &sender.ctx(),
                )
                .unwrap(),
        );

        // then (期待する結果):
        assert_eq!(edited.kind, EventKind::MessageEdited);
        assert_eq!(edited.delivery, Delivery::IncludeSender);
        assert_eq!(edited.body["messageId"], "7");
        assert_eq!(edited.body["editedBy"], "U1");
        assert_eq!(reaction.kind, EventKind::MessageReaction);
        assert_eq!(reaction.delivery, Delivery::IncludeSender);
    }

    #[test]
    fn test_mark_read_excludes_sender() {
        // テスト項目: mark_read は送信者以外に message_read として配信される
        // given (前提条件):
        let sender = Sender::u1();

        // when (操作):
        let event = published(
            ChatRouter
                .route("mark_read", json!({"roomId": "room-42", "messageId": "m1"}), &sender.ctx())
                .unwrap(),
        );

        // then (期待する結果):
        assert_eq!(event.kind, EventKind::MessageRead);
        assert_eq!(event.delivery, Delivery::ExcludeSender);
        assert_eq!(event.body["readAt"], "2023-01-01T00:00:00.123Z");
    }

    #[test]
    fn test_unknown_event_and_bad_payload() {
        // テスト項目: 未知のイベントと不正なペイロードはエラーになる
        // given (前提条件):
        let sender = Sender::u1();

        // when (操作):
        let unknown = ChatRouter.route("term_accepted", json!({}), &sender.ctx());
        let empty_room = ChatRouter.route("new_message", json!({"roomId": "", "content": "x"}), &sender.ctx());
        let missing = ChatRouter.route("new_message", json!({"content": "x"}), &sender.ctx());

        // then (期待する結果):
        assert_eq!(unknown, Err(RouteError::UnknownEvent("term_accepted".to_string())));
        assert!(matches!(empty_room, Err(RouteError::InvalidId(_))));
        assert!(matches!(missing, Err(RouteError::InvalidPayload { .. })));
    }
}
