//! Room Membership Index: which identities (and through which connections)
//! occupy which rooms.
//!
//! A room exists iff it has at least one member. Joining materializes it and
//! the last leave deletes it.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::{
    entity::{Identity, RoomMember, RoomSnapshot},
    value_object::{ConnectionId, RoomId, UserId, Username},
};

#[derive(Debug)]
struct MemberEntry {
    username: Username,
    connections: BTreeSet<ConnectionId>,
}

#[derive(Debug, Default)]
pub struct RoomMembershipIndex {
    rooms: HashMap<RoomId, BTreeMap<UserId, MemberEntry>>,
}

impl RoomMembershipIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate a connection of `identity` with the room.
    ///
    /// Idempotent per identity; returns `false` if this connection was
    /// already associated.
    pub fn join(
        &mut self,
        room_id: &RoomId,
        identity: &Identity,
        connection_id: &ConnectionId,
    ) -> bool {
        self.rooms
            .entry(room_id.clone())
            .or_default()
            .entry(identity.user_id.clone())
            .or_insert_with(|| MemberEntry {
                username: identity.username.clone(),
                connections: BTreeSet::new(),
            })
            .connections
            .insert(connection_id.clone())
    }

    /// Remove the association; prunes the member and then the room when
    /// they become empty. Returns `false` if nothing was associated.
    pub fn leave(
        &mut self,
        room_id: &RoomId,
        user_id: &UserId,
        connection_id: &ConnectionId,
    ) -> bool {
        let Some(members) = self.rooms.get_mut(room_id) else {
            return false;
        };
        let Some(entry) = members.get_mut(user_id) else {
            return false;
        };

        let removed = entry.connections.remove(connection_id);
        if entry.connections.is_empty() {
            members.remove(user_id);
        }
        if members.is_empty() {
            self.rooms.remove(room_id);
        }
        removed
    }

    /// Remove a connection from every room in `rooms` (the connection's
    /// `joined_rooms`), avoiding a full scan. Returns the rooms it was
    /// actually removed from.
    pub fn remove_connection<'a>(
        &mut self,
        connection_id: &ConnectionId,
        user_id: &UserId,
        rooms: impl IntoIterator<Item = &'a RoomId>,
    ) -> Vec<RoomId> {
        rooms
            .into_iter()
            .filter(|room_id| self.leave(room_id, user_id, connection_id))
            .cloned()
            .collect()
    }

    /// Snapshot of the identities in a room, sorted by user id.
    pub fn members_of(&self, room_id: &RoomId) -> Vec<Identity> {
        self.rooms
            .get(room_id)
            .map(|members| {
                members
                    .iter()
                    .map(|(user_id, entry)| Identity::new(user_id.clone(), entry.username.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every connection subscribed to a room, each exactly once.
    pub fn connections_in(&self, room_id: &RoomId) -> Vec<ConnectionId> {
        self.rooms
            .get(room_id)
            .map(|members| {
                members
                    .values()
                    .flat_map(|entry| entry.connections.iter().cloned())
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .collect()
            })
            .unwrap_or_default()
    }

    #[cfg(test)]
    pub fn contains_room(&self, room_id: &RoomId) -> bool {
        self.rooms.contains_key(room_id)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn snapshot(&self, room_id: &RoomId) -> Option<RoomSnapshot> {
        self.rooms.get(room_id).map(|members| RoomSnapshot {
            id: room_id.clone(),
            members: members
                .iter()
                .map(|(user_id, entry)| RoomMember {
                    identity: Identity::new(user_id.clone(), entry.username.clone()),
                    connections: entry.connections.len(),
                })
                .collect(),
        })
    }

    /// Snapshots of all rooms, sorted by room id.
    pub fn snapshots(&self) -> Vec<RoomSnapshot> {
        let mut room_ids: Vec<&RoomId> = self.rooms.keys().collect();
        room_ids.sort();
        room_ids
            .into_iter()
            .filter_map(|room_id| self.snapshot(room_id))
            .collect()
    }
}
