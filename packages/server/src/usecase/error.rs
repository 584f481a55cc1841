//! UseCase layer error definitions.

use thiserror::Error;

/// Errors of `init_user` handling
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentifyError {
    /// The connection is already gone; treated as a no-op by callers
    #[error("Unknown connection: {0}")]
    UnknownConnection(String),

    /// The connection already has an identity
    #[error("Connection '{0}' is already identified")]
    AlreadyIdentified(String),
}

/// Errors of the room detail query
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GetRoomDetailError {
    #[error("Invalid room id: {0}")]
    InvalidRoomId(String),

    #[error("Room not found")]
    RoomNotFound,
}
