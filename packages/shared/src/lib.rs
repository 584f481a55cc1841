//! Utilities shared by the SponsorLink real-time packages.

pub mod logger;
pub mod time;
