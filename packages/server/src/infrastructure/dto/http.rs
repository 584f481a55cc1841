//! HTTP API request/response DTOs.

use serde::{Deserialize, Serialize};

use super::websocket::RawId;

/// Per-namespace counters for `GET /api/namespaces`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamespaceSummaryDto {
    pub namespace: String,
    pub connections: usize,
    pub rooms: usize,
}

/// Room snapshot for the room endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub id: String,
    pub members: Vec<RoomMemberDto>,
}

/// Member of a room snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomMemberDto {
    pub user_id: String,
    pub username: String,
    pub connections: usize,
}

/// Body of `POST /api/notifications`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendNotificationRequest {
    pub user_id: RawId,
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

/// Response of `POST /api/notifications`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendNotificationResponse {
    pub delivered: usize,
}
