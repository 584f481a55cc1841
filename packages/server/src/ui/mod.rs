//! Real-time presence server: axum router, handlers and namespace channels.

mod handler;
pub mod namespace;
mod server;
mod signal;
pub mod state;

pub use server::Server;
