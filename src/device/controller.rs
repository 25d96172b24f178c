//! Actuator controller over an abstract device transport.

use super::{DeviceLink, DeviceTransport};
use crate::session::ports::{Actuator, ActuatorError, ActuatorResult};
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Highest accepted intensity percentage.
const MAX_LEVEL: u8 = 100;
/// How long the initial device scan runs.
const SCAN_WINDOW: Duration = Duration::from_secs(2);
/// Depth of the serialized command queue.
const COMMAND_QUEUE_DEPTH: usize = 16;

#[derive(Debug, Clone, Copy)]
enum DeviceCommand {
    SetLevel(u8),
    Stop,
}

/// Feedback controller implementing the session's [`Actuator`] port.
///
/// Commands are submitted to a dedicated worker task owning the device
/// link, so device I/O is serialized no matter which timer context asks for
/// feedback. Without a bound device every command degrades to a logged
/// simulation.
#[derive(Debug, Clone)]
pub struct ActuatorController {
    level: Arc<AtomicU8>,
    ready: Arc<AtomicBool>,
    commands: mpsc::Sender<DeviceCommand>,
}

impl ActuatorController {
    /// Starts the controller and, in the background, connects through the
    /// transport, scans briefly, and binds the first discovered device.
    ///
    /// Connection and scan failures degrade to simulated mode; they never
    /// surface to the caller. Must be called from within a tokio runtime.
    #[must_use]
    pub fn connect(transport: Arc<dyn DeviceTransport>) -> Self {
        Self::spawn_worker(Some(transport))
    }

    /// Starts the controller in simulated mode, with no transport at all.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn simulated() -> Self {
        Self::spawn_worker(None)
    }

    /// Returns whether a physical device is bound.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Returns the current intensity percentage.
    #[must_use]
    pub fn level(&self) -> u8 {
        self.level.load(Ordering::Acquire)
    }

    fn spawn_worker(transport: Option<Arc<dyn DeviceTransport>>) -> Self {
        let (commands, mut queue) = mpsc::channel(COMMAND_QUEUE_DEPTH);
        let level = Arc::new(AtomicU8::new(0));
        let ready = Arc::new(AtomicBool::new(false));
        let worker_ready = Arc::clone(&ready);
        drop(tokio::spawn(async move {
            let mut link = match transport {
                Some(transport) => bind_device(transport.as_ref()).await,
                None => None,
            };
            worker_ready.store(link.is_some(), Ordering::Release);
            while let Some(command) = queue.recv().await {
                dispatch(link.as_deref_mut(), command).await;
            }
        }));
        Self {
            level,
            ready,
            commands,
        }
    }
}

#[async_trait]
impl Actuator for ActuatorController {
    async fn set_level(&self, percent: u8) -> ActuatorResult<()> {
        let clamped = percent.min(MAX_LEVEL);
        self.level.store(clamped, Ordering::Release);
        self.commands
            .send(DeviceCommand::SetLevel(clamped))
            .await
            .map_err(|_| ActuatorError::Unavailable)
    }

    async fn stop(&self) -> ActuatorResult<()> {
        self.level.store(0, Ordering::Release);
        self.commands
            .send(DeviceCommand::Stop)
            .await
            .map_err(|_| ActuatorError::Unavailable)
    }
}

async fn bind_device(transport: &dyn DeviceTransport) -> Option<Box<dyn DeviceLink>> {
    let mut link = match transport.connect().await {
        Ok(link) => link,
        Err(err) => {
            warn!(%err, "device connection failed, running simulated");
            return None;
        }
    };
    match link.scan(SCAN_WINDOW).await {
        Ok(0) => {
            info!("no devices discovered after scan, running simulated");
            None
        }
        Ok(count) => {
            info!(count, "bound the first discovered device");
            Some(link)
        }
        Err(err) => {
            warn!(%err, "device scan failed, running simulated");
            None
        }
    }
}

async fn dispatch(link: Option<&mut (dyn DeviceLink + 'static)>, command: DeviceCommand) {
    let Some(device) = link else {
        match command {
            DeviceCommand::SetLevel(percent) => info!(percent, "simulated feedback level"),
            DeviceCommand::Stop => info!("simulated feedback stopped"),
        }
        return;
    };
    let result = match command {
        DeviceCommand::SetLevel(percent) => device.vibrate(amplitude(percent)).await,
        DeviceCommand::Stop => device.stop().await,
    };
    if let Err(err) = result {
        warn!(%err, "device command failed");
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "device amplitude is the unit fraction of the percentage"
)]
fn amplitude(percent: u8) -> f64 {
    f64::from(percent) / 100.0
}
