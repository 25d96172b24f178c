//! Settable in-memory environment probe.

use crate::session::ports::{EnvironmentProbe, title_matches};
use async_trait::async_trait;
use std::sync::{PoisonError, RwLock};

/// Probe over a settable list of open window titles.
#[derive(Debug, Default)]
pub struct StaticEnvironment {
    titles: RwLock<Vec<String>>,
}

impl StaticEnvironment {
    /// Creates an environment with no open windows.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a window as open.
    pub fn open_window(&self, title: impl Into<String>) {
        self.titles
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(title.into());
    }

    /// Closes every window whose title contains the given substring,
    /// case-insensitively.
    pub fn close_window(&self, title: &str) {
        self.titles
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|open| !title_matches(open, title));
    }

    /// Closes every window.
    pub fn close_all(&self) {
        self.titles
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

#[async_trait]
impl EnvironmentProbe for StaticEnvironment {
    async fn is_visible(&self, window_title: &str) -> bool {
        self.titles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|open| title_matches(open, window_title))
    }
}
