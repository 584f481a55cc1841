//! Namespace routers and the generic channel they plug into.
//!
//! Every namespace shares the same connect / identify / join / leave /
//! disconnect lifecycle ([`NamespaceChannel`]). A namespace only supplies its
//! event vocabulary through an [`EventRouter`], which turns an inbound frame
//! into a [`Command`] without touching any state.

mod channel;
pub mod chat;
pub mod contract;
pub mod deal;
pub mod notification;

pub use channel::{ChannelError, NamespaceChannel};

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;

use crate::domain::{
    Command, ConnectionId, Delivery, DomainEvent, EventKind, Identity, NamespaceKind, Origin,
    Target, Timestamp, ValueObjectError,
};
use sponsorlink_shared::time::timestamp_to_rfc3339;

/// Errors raised while routing one inbound event
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("Unknown event '{0}'")]
    UnknownEvent(String),

    #[error("Invalid payload for '{event}': {reason}")]
    InvalidPayload { event: String, reason: String },

    #[error("Invalid routing key: {0}")]
    InvalidId(#[from] ValueObjectError),

    #[error("Failed to encode outbound payload: {0}")]
    Encode(String),
}

/// The identified sender of an inbound event and the server time it was received.
#[derive(Debug, Clone, Copy)]
pub struct EventContext<'a> {
    pub connection_id: &'a ConnectionId,
    pub sender: &'a Identity,
    pub now: Timestamp,
}

impl EventContext<'_> {
    /// Server timestamp as sent on the wire
    pub fn timestamp(&self) -> String {
        timestamp_to_rfc3339(self.now.value())
    }

    pub fn sender_id(&self) -> String {
        self.sender.user_id.as_str().to_string()
    }

    pub fn sender_name(&self) -> String {
        self.sender.username.as_str().to_string()
    }

    /// Wrap an outbound body into an event originating from this connection.
    pub fn publish(
        &self,
        target: Target,
        delivery: Delivery,
        kind: EventKind,
        body: Value,
    ) -> Command {
        Command::Publish(DomainEvent {
            origin: Origin::User {
                identity: self.sender.clone(),
                connection_id: self.connection_id.clone(),
            },
            target,
            delivery,
            kind,
            body,
            timestamp: self.now,
        })
    }
}

/// Event vocabulary of one namespace.
///
/// `init_user` never reaches a router; the channel handles it for every
/// namespace.
pub trait EventRouter: Send + Sync {
    fn namespace(&self) -> NamespaceKind;

    fn route(
        &self,
        event: &str,
        data: Value,
        ctx: &EventContext<'_>,
    ) -> Result<Command, RouteError>;
}

/// Router for a namespace
pub fn router_for(kind: NamespaceKind) -> Box<dyn EventRouter> {
    match kind {
        NamespaceKind::Chat => Box::new(chat::ChatRouter),
        NamespaceKind::Contract => Box::new(contract::ContractRouter),
        NamespaceKind::Deal => Box::new(deal::DealRouter),
        NamespaceKind::Notification => Box::new(notification::NotificationRouter),
    }
}

pub(crate) fn parse<T: DeserializeOwned>(event: &str, data: Value) -> Result<T, RouteError> {
    serde_json::from_value(data).map_err(|e| RouteError::InvalidPayload {
        event: event.to_string(),
        reason: e.to_string(),
    })
}

pub(crate) fn encode<T: Serialize>(body: &T) -> Result<Value, RouteError> {
    serde_json::to_value(body).map_err(|e| RouteError::Encode(e.to_string()))
}
