//! WebSocket DTOs: the frame envelope and payloads shared by all namespaces.

pub mod chat;
pub mod contract;
pub mod deal;
pub mod notification;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Event name that binds an identity to a connection in every namespace
pub const INIT_USER_EVENT: &str = "init_user";

/// Inbound frame: `{"event": "...", "data": ...}`
#[derive(Debug, Clone, Deserialize)]
pub struct InboundEnvelope {
    pub event: String,
    #[serde(default)]
    pub data: Value,
}

/// Outbound frame, borrowed so one dispatch encodes the body once
#[derive(Debug, Serialize)]
pub struct OutboundEnvelope<'a> {
    pub event: &'a str,
    pub data: &'a Value,
}

/// Routing key sent by clients as either a JSON string or an integer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Integer(i64),
    Unsigned(u64),
}

impl RawId {
    pub fn into_string(self) -> String {
        match self {
            RawId::Text(s) => s,
            RawId::Integer(n) => n.to_string(),
            RawId::Unsigned(n) => n.to_string(),
        }
    }
}

/// `init_user{id, username}`
#[derive(Debug, Clone, Deserialize)]
pub struct InitUserPayload {
    pub id: RawId,
    #[serde(default)]
    pub username: Option<String>,
}

/// `init_success{socketId}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitSuccessPayload {
    pub socket_id: String,
}

/// Entry of `room_joined.activeUsers`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveUser {
    pub user_id: String,
    pub username: String,
}

/// `room_joined{roomId, activeUsers}` sent to the joining connection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomJoinedPayload {
    pub room_id: String,
    pub active_users: Vec<ActiveUser>,
}

/// `user_joined` / `user_left`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipPayload {
    pub user_id: String,
    pub username: String,
    pub socket_id: String,
    pub room_id: String,
}
