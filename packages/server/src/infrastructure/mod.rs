//! Infrastructure layer: concrete repository and transport implementations
//! plus the wire DTOs.

pub mod dto;
pub mod message_pusher;
pub mod repository;
