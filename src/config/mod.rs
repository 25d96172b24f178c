//! Parsed player configuration.
//!
//! The configuration file is optional and currently carries only the stored
//! account reference consumed by verification before falling back to the
//! interactive prompt.

use serde::Deserialize;
use thiserror::Error;

/// Errors returned while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration JSON could not be parsed.
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Player configuration, parsed from the on-disk `config.json` shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    bluesky_account: Option<String>,
}

impl GameConfig {
    /// Parses configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON.
    pub fn from_json(data: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(data)?)
    }

    /// Builds a configuration with a stored account reference.
    #[must_use]
    pub fn with_account(account: impl Into<String>) -> Self {
        Self {
            bluesky_account: Some(account.into()),
        }
    }

    /// Returns the stored account reference, if any.
    #[must_use]
    pub fn bluesky_account(&self) -> Option<&str> {
        self.bluesky_account.as_deref()
    }
}
