//! In-memory actuator doubles.

use crate::session::ports::{Actuator, ActuatorError, ActuatorResult};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// Actuator double that records every level it is asked to hold.
#[derive(Debug, Default)]
pub struct RecordingActuator {
    level: AtomicU8,
    history: Mutex<Vec<u8>>,
}

impl RecordingActuator {
    /// Creates an idle actuator at level zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current level.
    #[must_use]
    pub fn level(&self) -> u8 {
        self.level.load(Ordering::Acquire)
    }

    /// Returns every level set so far, in order.
    #[must_use]
    pub fn history(&self) -> Vec<u8> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, level: u8) {
        self.level.store(level, Ordering::Release);
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(level);
    }
}

#[async_trait]
impl Actuator for RecordingActuator {
    async fn set_level(&self, percent: u8) -> ActuatorResult<()> {
        let clamped = percent.min(100);
        debug!(clamped, "simulated feedback level");
        self.record(clamped);
        Ok(())
    }

    async fn stop(&self) -> ActuatorResult<()> {
        debug!("simulated feedback stopped");
        self.record(0);
        Ok(())
    }
}

/// Actuator double whose every command fails, for exercising the session's
/// degrade-and-continue path.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableActuator;

#[async_trait]
impl Actuator for UnavailableActuator {
    async fn set_level(&self, _percent: u8) -> ActuatorResult<()> {
        Err(ActuatorError::Unavailable)
    }

    async fn stop(&self) -> ActuatorResult<()> {
        Err(ActuatorError::Unavailable)
    }
}
