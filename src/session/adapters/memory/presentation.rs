//! Recording presentation sink.

use crate::session::ports::PresentationPort;
use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};

/// Presentation double recording every status line and input toggle.
#[derive(Debug, Default)]
pub struct RecordingPresentation {
    statuses: Mutex<Vec<String>>,
    inputs: Mutex<Vec<bool>>,
}

impl RecordingPresentation {
    /// Creates an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every status line set so far, in order.
    #[must_use]
    pub fn statuses(&self) -> Vec<String> {
        self.statuses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent status line, if any.
    #[must_use]
    pub fn last_status(&self) -> Option<String> {
        self.statuses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// The most recent input enablement, if any was set.
    #[must_use]
    pub fn inputs_enabled(&self) -> Option<bool> {
        self.inputs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .copied()
    }

    /// Every input toggle so far, in order.
    #[must_use]
    pub fn input_history(&self) -> Vec<bool> {
        self.inputs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl PresentationPort for RecordingPresentation {
    async fn set_status_text(&self, text: &str) {
        self.statuses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(text.to_owned());
    }

    async fn set_inputs_enabled(&self, enabled: bool) {
        self.inputs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(enabled);
    }
}
