//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::{NamespaceKind, UserId},
    infrastructure::dto::http::{
        NamespaceSummaryDto, RoomSummaryDto, SendNotificationRequest, SendNotificationResponse,
    },
    ui::{namespace::notification::system_notification, state::AppState},
    usecase::GetRoomDetailError,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Connection and room counts per namespace
pub async fn list_namespaces(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<NamespaceSummaryDto>> {
    let mut summaries = Vec::with_capacity(state.channels.len());
    for channel in state.ordered() {
        summaries.push(NamespaceSummaryDto {
            namespace: channel.kind().to_string(),
            connections: channel.connection_count().await,
            rooms: channel.room_count().await,
        });
    }
    Json(summaries)
}

/// Get list of rooms of a namespace
pub async fn get_rooms(
    State(state): State<Arc<AppState>>,
    Path(namespace): Path<String>,
) -> Result<Json<Vec<RoomSummaryDto>>, StatusCode> {
    let channel = state.channel(&namespace).ok_or(StatusCode::NOT_FOUND)?;

    // Domain Model から DTO への変換
    let rooms: Vec<RoomSummaryDto> = channel.rooms().await.into_iter().map(Into::into).collect();
    Ok(Json(rooms))
}

/// Get room detail by ID
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path((namespace, room_id)): Path<(String, String)>,
) -> Result<Json<RoomSummaryDto>, StatusCode> {
    let channel = state.channel(&namespace).ok_or(StatusCode::NOT_FOUND)?;

    match channel.room(room_id).await {
        Ok(room) => Ok(Json(room.into())),
        Err(GetRoomDetailError::RoomNotFound) => Err(StatusCode::NOT_FOUND),
        Err(GetRoomDetailError::InvalidRoomId(id)) => {
            tracing::warn!("Invalid room id: '{}'", id);
            Err(StatusCode::BAD_REQUEST)
        }
    }
}

/// Push a `new_notification` to every live connection of a user.
///
/// Offline users miss the notification; nothing is queued.
pub async fn send_notification(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SendNotificationRequest>,
) -> Result<Json<SendNotificationResponse>, StatusCode> {
    let channel = state
        .channel(NamespaceKind::Notification.as_str())
        .ok_or(StatusCode::SERVICE_UNAVAILABLE)?;

    let user_id = UserId::new(request.user_id.into_string()).map_err(|e| {
        tracing::warn!("Invalid notification target: {}", e);
        StatusCode::BAD_REQUEST
    })?;
    let event = system_notification(
        user_id.clone(),
        request.message,
        request.kind,
        request.link,
        channel.now(),
    )
    .map_err(|e| {
        tracing::error!("Failed to build notification: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let report = channel.publish(&event).await;
    tracing::info!(
        "Notification for '{}' delivered to {} connection(s)",
        user_id,
        report.delivered
    );
    Ok(Json(SendNotificationResponse {
        delivered: report.delivered,
    }))
}
