//! Simonsays: single-player compliance game engine.
//!
//! This crate implements the core of a "Simon says" obedience game: it picks
//! a random task, flags whether Simon actually said to do it, watches the
//! player's environment for evidence the task started, counts down a time
//! budget, verifies social-post tasks against a public feed, and drives a
//! feedback actuator as positive or negative reinforcement.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure game rules with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external collaborators
//! - **Adapters**: Concrete implementations of ports (HTTP feed verifier,
//!   in-memory doubles)
//! - **Services**: The [`session::services::TaskSession`] state machine
//!   orchestrating a round from pick to resolution
//!
//! # Modules
//!
//! - [`catalog`]: Task descriptors and random selection
//! - [`session`]: The round lifecycle state machine and its collaborators
//! - [`device`]: Feedback actuator controller with simulated fallback
//! - [`config`]: Parsed player configuration

pub mod catalog;
pub mod config;
pub mod device;
pub mod session;
