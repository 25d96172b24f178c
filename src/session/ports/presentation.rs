//! Presentation sink port.

use async_trait::async_trait;

/// The only outputs the core produces toward a user interface.
#[async_trait]
pub trait PresentationPort: Send + Sync {
    /// Replaces the displayed status line.
    async fn set_status_text(&self, text: &str);

    /// Enables or disables the player's input controls.
    async fn set_inputs_enabled(&self, enabled: bool);
}
