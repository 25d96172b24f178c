//! Port contracts for round lifecycle management.
//!
//! Ports define infrastructure-agnostic interfaces used by the session: the
//! feedback actuator, the host environment probe, the social feed verifier,
//! the presentation sink, and the player-facing action hooks.

pub mod actions;
pub mod actuator;
pub mod environment;
pub mod feed;
pub mod presentation;

pub use actions::{AccountPrompt, ActionError, ActionResult, TaskActions};
pub use actuator::{Actuator, ActuatorError, ActuatorResult};
pub use environment::{EnvironmentProbe, title_matches};
pub use feed::{FeedError, FeedResult, SocialFeedVerifier};
pub use presentation::PresentationPort;
