//! Transport contracts for the feedback device.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Result type for device transport operations.
pub type DeviceResult<T> = Result<T, DeviceError>;

/// Errors returned by device transports.
#[derive(Debug, Clone, Error)]
pub enum DeviceError {
    /// The device server could not be reached.
    #[error("could not connect to the device server: {0}")]
    Connect(Arc<dyn std::error::Error + Send + Sync>),
    /// A command was rejected or lost.
    #[error("device command failed: {0}")]
    Command(Arc<dyn std::error::Error + Send + Sync>),
}

impl DeviceError {
    /// Wraps a connection failure.
    #[must_use]
    pub fn connect(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Connect(Arc::new(err))
    }

    /// Wraps a command failure.
    #[must_use]
    pub fn command(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Command(Arc::new(err))
    }
}

/// Connection factory for a local device server.
#[async_trait]
pub trait DeviceTransport: Send + Sync {
    /// Establishes a link to the device server.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::Connect`] when the server is unreachable.
    async fn connect(&self) -> DeviceResult<Box<dyn DeviceLink>>;
}

/// An established link carrying scan and command traffic.
#[async_trait]
pub trait DeviceLink: Send {
    /// Scans for devices for roughly the given window and binds the first
    /// one discovered. Returns how many devices were seen.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::Command`] when the server rejects scanning.
    async fn scan(&mut self, window: Duration) -> DeviceResult<usize>;

    /// Drives the bound device at an amplitude in `0.0..=1.0`.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::Command`] when the command is rejected.
    async fn vibrate(&mut self, amplitude: f64) -> DeviceResult<()>;

    /// Stops the bound device.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::Command`] when the command is rejected.
    async fn stop(&mut self) -> DeviceResult<()>;
}
