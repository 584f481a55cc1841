//! Conversion logic from domain entities to DTOs.

use crate::domain::{Identity, RoomMember, RoomSnapshot};
use crate::infrastructure::dto::{http, websocket};

impl From<Identity> for websocket::ActiveUser {
    fn from(identity: Identity) -> Self {
        Self {
            user_id: identity.user_id.into_string(),
            username: identity.username.to_string(),
        }
    }
}

impl From<RoomMember> for http::RoomMemberDto {
    fn from(member: RoomMember) -> Self {
        Self {
            user_id: member.identity.user_id.into_string(),
            username: member.identity.username.to_string(),
            connections: member.connections,
        }
    }
}

impl From<RoomSnapshot> for http::RoomSummaryDto {
    fn from(room: RoomSnapshot) -> Self {
        Self {
            id: room.id.into_string(),
            members: room.members.into_iter().map(Into::into).collect(),
        }
    }
}
