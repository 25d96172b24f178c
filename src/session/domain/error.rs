//! Error types for session operations.

use thiserror::Error;

/// Errors returned by session entry points.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    /// A round is already in flight; only one pick may be active at a time.
    #[error("a task round is already in progress")]
    RoundInProgress,
}
