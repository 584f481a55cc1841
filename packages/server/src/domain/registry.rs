//! Connection Registry: live connections and the identity bound to each.

use std::collections::{BTreeSet, HashMap};

use super::{
    entity::{Connection, Identity},
    error::RegistryError,
    value_object::{ConnectionId, RoomId, Timestamp, UserId},
};

/// In-memory registry of live connections with a reverse index from
/// identity to connections.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: HashMap<ConnectionId, Connection>,
    by_user: HashMap<UserId, BTreeSet<ConnectionId>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an anonymous connection record.
    ///
    /// Registering an id twice keeps the existing record.
    pub fn register(&mut self, connection_id: ConnectionId, connected_at: Timestamp) -> Connection {
        self.connections
            .entry(connection_id.clone())
            .or_insert_with(|| Connection::new(connection_id, connected_at))
            .clone()
    }

    /// Bind an identity to a connection.
    ///
    /// # Errors
    ///
    /// * `RegistryError::UnknownConnection` - the connection is gone
    /// * `RegistryError::AlreadyIdentified` - an identity is already bound
    pub fn identify(
        &mut self,
        connection_id: &ConnectionId,
        identity: Identity,
    ) -> Result<(), RegistryError> {
        let connection = self
            .connections
            .get_mut(connection_id)
            .ok_or_else(|| RegistryError::UnknownConnection(connection_id.to_string()))?;

        if let Some(existing) = &connection.identity {
            return Err(RegistryError::AlreadyIdentified {
                connection_id: connection_id.to_string(),
                user_id: existing.user_id.to_string(),
            });
        }

        self.by_user
            .entry(identity.user_id.clone())
            .or_default()
            .insert(connection_id.clone());
        connection.identity = Some(identity);
        Ok(())
    }

    pub fn lookup(&self, connection_id: &ConnectionId) -> Option<&Connection> {
        self.connections.get(connection_id)
    }

    /// Identity of a connection that is allowed to send domain events.
    ///
    /// # Errors
    ///
    /// * `RegistryError::UnknownConnection` - the connection is gone
    /// * `RegistryError::UnidentifiedSender` - `init_user` was never received
    pub fn identity_of(&self, connection_id: &ConnectionId) -> Result<&Identity, RegistryError> {
        let connection = self
            .lookup(connection_id)
            .ok_or_else(|| RegistryError::UnknownConnection(connection_id.to_string()))?;
        connection
            .identity
            .as_ref()
            .ok_or_else(|| RegistryError::UnidentifiedSender(connection_id.to_string()))
    }

    /// All live connections bound to an identity, sorted.
    pub fn connections_for(&self, user_id: &UserId) -> Vec<ConnectionId> {
        self.by_user
            .get(user_id)
            .map(|ids| ids.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Remove a connection and its reverse-index entry.
    ///
    /// Idempotent: the second call returns `None`.
    pub fn unregister(&mut self, connection_id: &ConnectionId) -> Option<Connection> {
        let connection = self.connections.remove(connection_id)?;

        if let Some(identity) = &connection.identity
            && let Some(ids) = self.by_user.get_mut(&identity.user_id)
        {
            ids.remove(connection_id);
            if ids.is_empty() {
                self.by_user.remove(&identity.user_id);
            }
        }

        Some(connection)
    }

    /// Record that a connection occupies a room. Returns `false` if it already did.
    pub(crate) fn record_join(&mut self, connection_id: &ConnectionId, room_id: &RoomId) -> bool {
        self.connections
            .get_mut(connection_id)
            .is_some_and(|c| c.joined_rooms.insert(room_id.clone()))
    }

    /// Record that a connection left a room. Returns `false` if it was not there.
    pub(crate) fn record_leave(&mut self, connection_id: &ConnectionId, room_id: &RoomId) -> bool {
        self.connections
            .get_mut(connection_id)
            .is_some_and(|c| c.joined_rooms.remove(room_id))
    }

    /// Number of live connections
    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}
