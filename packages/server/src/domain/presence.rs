//! Presence aggregate: the Connection Registry and the Room Membership Index
//! mutated together, so a connection's `joined_rooms` and the index never
//! disagree.

use super::{
    entity::{Connection, Departure, Identity, JoinOutcome, RoomSnapshot},
    error::RegistryError,
    event::Target,
    membership::RoomMembershipIndex,
    registry::ConnectionRegistry,
    value_object::{ConnectionId, RoomId, Timestamp, UserId},
};

#[derive(Debug, Default)]
pub struct Presence {
    registry: ConnectionRegistry,
    rooms: RoomMembershipIndex,
}

impl Presence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, connection_id: ConnectionId, connected_at: Timestamp) -> Connection {
        self.registry.register(connection_id, connected_at)
    }

    pub fn identify(
        &mut self,
        connection_id: &ConnectionId,
        identity: Identity,
    ) -> Result<(), RegistryError> {
        self.registry.identify(connection_id, identity)
    }

    pub fn lookup(&self, connection_id: &ConnectionId) -> Option<&Connection> {
        self.registry.lookup(connection_id)
    }

    /// Identity of a connection allowed to act in rooms.
    pub fn sender(&self, connection_id: &ConnectionId) -> Result<&Identity, RegistryError> {
        self.registry.identity_of(connection_id)
    }

    pub fn connections_for(&self, user_id: &UserId) -> Vec<ConnectionId> {
        self.registry.connections_for(user_id)
    }

    /// Join a room. Only identified connections may join.
    pub fn join(
        &mut self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
    ) -> Result<JoinOutcome, RegistryError> {
        let identity = self.registry.identity_of(connection_id)?.clone();

        let newly_joined = self.registry.record_join(connection_id, room_id);
        self.rooms.join(room_id, &identity, connection_id);

        Ok(JoinOutcome {
            room: room_id.clone(),
            members: self.rooms.members_of(room_id),
            identity,
            newly_joined,
        })
    }

    /// Leave a room. Returns the identity if the connection was in the room.
    pub fn leave(
        &mut self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
    ) -> Result<Option<Identity>, RegistryError> {
        let identity = self.registry.identity_of(connection_id)?.clone();

        if !self.registry.record_leave(connection_id, room_id) {
            return Ok(None);
        }
        self.rooms.leave(room_id, &identity.user_id, connection_id);
        Ok(Some(identity))
    }

    /// Remove a connection from the registry and from every room it joined.
    ///
    /// Returns `None` if the connection was already gone.
    pub fn disconnect(&mut self, connection_id: &ConnectionId) -> Option<Departure> {
        let connection = self.registry.unregister(connection_id)?;

        let rooms = match &connection.identity {
            Some(identity) => self.rooms.remove_connection(
                connection_id,
                &identity.user_id,
                connection.joined_rooms.iter(),
            ),
            None => Vec::new(),
        };

        Some(Departure { connection, rooms })
    }

    /// Resolve a dispatch target to the live connections behind it.
    pub fn resolve(&self, target: &Target) -> Vec<ConnectionId> {
        match target {
            Target::Room(room_id) => self.rooms.connections_in(room_id),
            Target::User(user_id) => self.registry.connections_for(user_id),
            Target::Connection(connection_id) => self
                .registry
                .lookup(connection_id)
                .map(|c| vec![c.id.clone()])
                .unwrap_or_default(),
        }
    }

    pub fn members_of(&self, room_id: &RoomId) -> Vec<Identity> {
        self.rooms.members_of(room_id)
    }

    pub fn room(&self, room_id: &RoomId) -> Option<RoomSnapshot> {
        self.rooms.snapshot(room_id)
    }

    pub fn rooms(&self) -> Vec<RoomSnapshot> {
        self.rooms.snapshots()
    }

    pub fn connection_count(&self) -> usize {
        self.registry.len()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.room_count()
    }
}
