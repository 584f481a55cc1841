//! Notification namespace: `new_notification` pushed to a user's connections.

use serde_json::Value;

use super::{EventContext, EventRouter, RouteError, encode, parse};
use crate::{
    domain::{
        Command, Delivery, DomainEvent, EventKind, NamespaceKind, Origin, RoomId, Target,
        Timestamp, UserId,
    },
    infrastructure::dto::websocket::notification::{NewNotification, SendNotificationPayload},
};
use sponsorlink_shared::time::timestamp_to_rfc3339;

pub struct NotificationRouter;

impl EventRouter for NotificationRouter {
    fn namespace(&self) -> NamespaceKind {
        NamespaceKind::Notification
    }

    fn route(
        &self,
        event: &str,
        data: Value,
        ctx: &EventContext<'_>,
    ) -> Result<Command, RouteError> {
        match event {
            "subscribe_notifications" => Ok(Command::Join(RoomId::inbox(&ctx.sender.user_id))),
            "send_notification" => {
                let payload: SendNotificationPayload = parse(event, data)?;
                let user_id = UserId::new(payload.user_id.into_string())?;
                let body = encode(&NewNotification {
                    message: payload.message,
                    kind: payload.kind,
                    link: payload.link,
                    timestamp: ctx.timestamp(),
                })?;
                Ok(ctx.publish(
                    Target::User(user_id),
                    Delivery::IncludeSender,
                    EventKind::NewNotification,
                    body,
                ))
            }
            other => Err(RouteError::UnknownEvent(other.to_string())),
        }
    }
}

/// A notification raised by the server itself (HTTP API), not by a client.
pub fn system_notification(
    user_id: UserId,
    message: String,
    kind: Option<String>,
    link: Option<String>,
    now: Timestamp,
) -> Result<DomainEvent, RouteError> {
    let body = encode(&NewNotification {
        message,
        kind,
        link,
        timestamp: timestamp_to_rfc3339(now.value()),
    })?;
    Ok(DomainEvent {
        origin: Origin::System,
        target: Target::User(user_id),
        delivery: Delivery::IncludeSender,
        kind: EventKind::NewNotification,
        body,
        timestamp: now,
    })
}
