//! Chat namespace payloads.

use serde::{Deserialize, Serialize};

use super::RawId;

/// `join_room` / `leave_room`: a bare room id or `{roomId, userId}`.
///
/// `userId` is ignored; membership always uses the bound identity.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RoomRef {
    Bare(RawId),
    #[serde(rename_all = "camelCase")]
    Object { room_id: RawId },
}

impl RoomRef {
    pub fn into_string(self) -> String {
        match self {
            RoomRef::Bare(id) | RoomRef::Object { room_id: id } => id.into_string(),
        }
    }
}

/// `send_message{roomId, message, userId}` (legacy)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessagePayload {
    pub room_id: RawId,
    pub message: String,
}

/// `new_message{roomId, content}`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessagePayload {
    pub room_id: RawId,
    pub content: String,
}

/// `new_message_with_media{roomId, content?, mediaUrl, mediaType}`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaMessagePayload {
    pub room_id: RawId,
    #[serde(default)]
    pub content: Option<String>,
    pub media_url: String,
    pub media_type: String,
}

/// `typing` / `typing_start` / `typing_end`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingPayload {
    pub room_id: RawId,
}

/// `add_reaction{roomId, messageId, reaction}`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionPayload {
    pub room_id: RawId,
    pub message_id: RawId,
    pub reaction: String,
}

/// `delete_message` / `mark_read`: `{roomId, messageId}`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRefPayload {
    pub room_id: RawId,
    pub message_id: RawId,
}

/// `edit_message{roomId, messageId, newContent}`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditMessagePayload {
    pub room_id: RawId,
    pub message_id: RawId,
    pub new_content: String,
}

/// `receive_message`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiveMessage {
    pub id: String,
    #[serde(rename = "roomId")]
    pub room_id: String,
    pub content: String,
    #[serde(rename = "UserId")]
    pub user_id: String,
    pub username: String,
    pub created_at: String,
}

/// `receive_media_message`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiveMediaMessage {
    pub id: String,
    #[serde(rename = "roomId")]
    pub room_id: String,
    pub content: Option<String>,
    #[serde(rename = "mediaUrl")]
    pub media_url: String,
    #[serde(rename = "mediaType")]
    pub media_type: String,
    #[serde(rename = "UserId")]
    pub user_id: String,
    pub username: String,
    pub created_at: String,
}

/// `user_typing`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTyping {
    pub user_id: String,
    pub username: String,
    pub room_id: String,
    pub is_typing: bool,
}

/// `message_reaction`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageReaction {
    pub room_id: String,
    pub message_id: String,
    pub reaction: String,
    pub user_id: String,
    pub username: String,
    pub timestamp: String,
}

/// `message_deleted`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDeleted {
    pub room_id: String,
    pub message_id: String,
    pub deleted_by: String,
    pub timestamp: String,
}

/// `message_edited`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageEdited {
    pub room_id: String,
    pub message_id: String,
    pub new_content: String,
    pub edited_by: String,
    pub timestamp: String,
}

/// `message_read`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRead {
    pub room_id: String,
    pub message_id: String,
    pub user_id: String,
    pub read_at: String,
}
