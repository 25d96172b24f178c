//! Recording action hooks and static prompts.

use crate::session::ports::{AccountPrompt, ActionError, ActionResult, TaskActions};
use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};

/// Action double recording opened links and copied texts.
#[derive(Debug, Default)]
pub struct RecordingActions {
    opened: Mutex<Vec<String>>,
    copied: Mutex<Vec<String>>,
    refuse_open: bool,
}

impl RecordingActions {
    /// Creates hooks that accept every action.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates hooks whose link opening always fails.
    #[must_use]
    pub fn refusing_links() -> Self {
        Self {
            opened: Mutex::new(Vec::new()),
            copied: Mutex::new(Vec::new()),
            refuse_open: true,
        }
    }

    /// Every link opened so far, in order.
    #[must_use]
    pub fn opened_links(&self) -> Vec<String> {
        self.opened
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Every text copied so far, in order.
    #[must_use]
    pub fn copied_texts(&self) -> Vec<String> {
        self.copied
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl TaskActions for RecordingActions {
    async fn open_link(&self, url: &str) -> ActionResult<()> {
        if self.refuse_open {
            return Err(ActionError::new(std::io::Error::other(
                "browser refused to open the link",
            )));
        }
        self.opened
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url.to_owned());
        Ok(())
    }

    async fn copy_text(&self, text: &str) -> ActionResult<()> {
        self.copied
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(text.to_owned());
        Ok(())
    }
}

/// Prompt double answering with a fixed account reference.
#[derive(Debug, Clone)]
pub struct StaticPrompt {
    handle: String,
}

impl StaticPrompt {
    /// Creates a prompt that always answers with `handle`.
    #[must_use]
    pub fn new(handle: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
        }
    }
}

#[async_trait]
impl AccountPrompt for StaticPrompt {
    async fn request_account(&self) -> Option<String> {
        Some(self.handle.clone())
    }
}

/// Prompt double that always declines.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentPrompt;

#[async_trait]
impl AccountPrompt for SilentPrompt {
    async fn request_account(&self) -> Option<String> {
        None
    }
}
