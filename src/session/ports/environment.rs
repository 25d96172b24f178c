//! Host environment probe port.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

/// Query over the host's currently visible windows.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait EnvironmentProbe: Send + Sync {
    /// Returns `true` iff any open window's title contains the given
    /// substring, case-insensitively. Pure query, cheap enough to poll at
    /// 1 Hz.
    async fn is_visible(&self, window_title: &str) -> bool;
}

/// Case-insensitive substring match shared by probe implementations.
#[must_use]
pub fn title_matches(title: &str, needle: &str) -> bool {
    title.to_lowercase().contains(&needle.to_lowercase())
}
