//! Real-time messaging and presence layer of the sponsorship platform.
//!
//! Tracks connections and room membership per namespace (chat, contract,
//! deal, notification) and fans events out to the right live connections.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
