//! In-memory doubles for every session port.
//!
//! These adapters back the crate's tests and double as the simulated mode
//! for hosts without a real device, window enumerator, or network.

mod actions;
mod actuator;
mod environment;
mod feed;
mod presentation;

pub use actions::{RecordingActions, SilentPrompt, StaticPrompt};
pub use actuator::{RecordingActuator, UnavailableActuator};
pub use environment::StaticEnvironment;
pub use feed::ScriptedFeedVerifier;
pub use presentation::RecordingPresentation;
