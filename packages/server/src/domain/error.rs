//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// ConnectionId validation error
    #[error("ConnectionId cannot be empty")]
    ConnectionIdEmpty,

    /// UserId validation error
    #[error("UserId cannot be empty")]
    UserIdEmpty,

    /// Username validation error
    #[error("Username cannot be empty")]
    UsernameEmpty,

    /// RoomId validation error
    #[error("RoomId cannot be empty")]
    RoomIdEmpty,
}

/// Errors raised by the Connection Registry and the Room Membership Index.
///
/// None of these ever reach a client; callers log them and drop the event.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The connection is not (or no longer) registered
    #[error("Unknown connection: {0}")]
    UnknownConnection(String),

    /// The connection already has an identity bound to it
    #[error("Connection '{connection_id}' is already identified as '{user_id}'")]
    AlreadyIdentified {
        connection_id: String,
        user_id: String,
    },

    /// The connection has not sent `init_user` yet
    #[error("Connection '{0}' has no identity")]
    UnidentifiedSender(String),
}

/// Errors related to message delivery through the transport
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MessagePushError {
    /// No transport channel is registered for the connection
    #[error("Client not found: {0}")]
    ClientNotFound(String),

    /// The transport channel is closed or the frame could not be encoded
    #[error("Failed to push message: {0}")]
    PushFailed(String),
}
