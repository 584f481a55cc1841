//! Data Transfer Objects (DTOs) for the real-time server.
//!
//! DTOs are organized by protocol:
//! - `websocket`: the `{event, data}` envelope and per-namespace payloads
//! - `http`: HTTP API request/response DTOs

pub mod conversion;
pub mod http;
pub mod websocket;
