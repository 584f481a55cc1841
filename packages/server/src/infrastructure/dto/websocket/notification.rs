//! Notification namespace payloads.

use serde::{Deserialize, Serialize};

use super::RawId;

/// `send_notification{userId, message, type, link}`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendNotificationPayload {
    pub user_id: RawId,
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

/// `new_notification{message, type, link, timestamp}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNotification {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub link: Option<String>,
    pub timestamp: String,
}
