//! Adapter implementations of the session ports.

pub mod bluesky;
pub mod memory;
