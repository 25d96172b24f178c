//! Feedback actuator port.

use async_trait::async_trait;
use thiserror::Error;

/// Result type for actuator operations.
pub type ActuatorResult<T> = Result<T, ActuatorError>;

/// Abstract feedback device driven by an intensity level.
///
/// Implementations must clamp levels to the 0–100 range. Failures are
/// non-fatal to the game: the session logs them and carries on.
#[async_trait]
pub trait Actuator: Send + Sync {
    /// Sets the feedback intensity as a percentage.
    ///
    /// # Errors
    ///
    /// Returns [`ActuatorError::Unavailable`] when no device path exists.
    async fn set_level(&self, percent: u8) -> ActuatorResult<()>;

    /// Stops all feedback; equivalent to level zero plus an explicit stop
    /// command when a device is attached.
    ///
    /// # Errors
    ///
    /// Returns [`ActuatorError::Unavailable`] when no device path exists.
    async fn stop(&self) -> ActuatorResult<()>;
}

/// Errors returned by actuator implementations.
#[derive(Debug, Clone, Error)]
pub enum ActuatorError {
    /// No feedback device is reachable; the caller should fall back to
    /// simulated feedback.
    #[error("no feedback device is available")]
    Unavailable,
}
