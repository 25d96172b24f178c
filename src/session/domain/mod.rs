//! Domain model for round lifecycle management.
//!
//! The round domain models one challenge instance from pick to resolution
//! while keeping all infrastructure concerns outside of the domain boundary.

mod account;
mod error;
mod instance;
mod outcome;
mod round;

pub use account::AccountId;
pub use error::SessionError;
pub use instance::TaskInstance;
pub use outcome::{FailureReason, RoundOutcome};
pub use round::Round;
