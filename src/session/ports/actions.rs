//! Player-facing action hooks and the interactive account prompt.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for visible task actions.
pub type ActionResult<T> = Result<T, ActionError>;

/// A visible task action could not be performed.
#[derive(Debug, Clone, Error)]
#[error("task action failed: {0}")]
pub struct ActionError(Arc<dyn std::error::Error + Send + Sync>);

impl ActionError {
    /// Wraps an underlying failure.
    #[must_use]
    pub fn new(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }
}

/// Host-side hooks for the task's visible action.
#[async_trait]
pub trait TaskActions: Send + Sync {
    /// Opens a link in the player's browser.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError`] when the host refuses the action.
    async fn open_link(&self, url: &str) -> ActionResult<()>;

    /// Places text on the player's clipboard.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError`] when the clipboard is unavailable.
    async fn copy_text(&self, text: &str) -> ActionResult<()>;
}

/// Interactive fallback for obtaining the player's account reference when
/// no configured account is stored.
#[async_trait]
pub trait AccountPrompt: Send + Sync {
    /// Asks the player for a handle or profile URL. `None` means the player
    /// declined.
    async fn request_account(&self) -> Option<String>;
}
