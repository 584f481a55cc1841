//! Domain layer for the real-time presence and messaging core.
//!
//! This module contains the connection/room bookkeeping and event model that
//! are independent of the transport and of data transfer objects (DTOs).

pub mod entity;
pub mod error;
pub mod event;
pub mod factory;
pub mod membership;
pub mod message_pusher;
pub mod namespace;
pub mod presence;
pub mod registry;
pub mod repository;
pub mod value_object;

pub use entity::{Connection, Departure, Identity, JoinOutcome, RoomMember, RoomSnapshot};
pub use error::{MessagePushError, RegistryError, ValueObjectError};
pub use event::{Command, Delivery, DomainEvent, EventKind, Origin, Target};
pub use factory::{ConnectionIdFactory, MessageIdFactory};
pub use membership::RoomMembershipIndex;
pub use message_pusher::{BroadcastReport, MessagePusher, PusherChannel};
pub use namespace::{NamespaceKind, UnknownNamespace};
pub use presence::Presence;
pub use registry::ConnectionRegistry;
pub use repository::PresenceRepository;
pub use value_object::{ConnectionId, RoomId, Timestamp, UserId, Username};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
