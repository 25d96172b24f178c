//! Feedback device control.
//!
//! [`ActuatorController`] implements the session's actuator port over an
//! abstract message-based device transport. Connection is a background
//! affair: connect, scan briefly, bind the first discovered device, and
//! degrade to simulated feedback when any step fails. Device I/O is
//! serialized on a dedicated worker task so timer contexts never touch the
//! transport directly.

mod controller;
mod ports;

pub use controller::ActuatorController;
pub use ports::{DeviceError, DeviceLink, DeviceResult, DeviceTransport};
