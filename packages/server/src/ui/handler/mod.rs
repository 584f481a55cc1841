//! HTTP and WebSocket handlers.

mod http;
mod websocket;

pub use http::{get_room_detail, get_rooms, health_check, list_namespaces, send_notification};
pub use websocket::websocket_handler;
