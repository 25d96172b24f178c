//! Round lifecycle management for the compliance game.
//!
//! A round begins when the session picks a task, assigns the Simon-says flag,
//! and raises the actuator; it ends exactly once, through whichever of the
//! racing paths (timer expiry, environment loss, player action, verification
//! result) wins. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The orchestrating state machine in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
