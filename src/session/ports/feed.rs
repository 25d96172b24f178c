//! Social feed verification port.

use crate::session::domain::AccountId;
use async_trait::async_trait;
use thiserror::Error;

/// Result type for feed verifier operations.
pub type FeedResult<T> = Result<T, FeedError>;

/// Read-only access to a public social feed.
///
/// Both operations are idempotent and safe to retry; implementations cache
/// nothing, the session stores the single resolved [`AccountId`] on the
/// round.
#[async_trait]
pub trait SocialFeedVerifier: Send + Sync {
    /// Maps an account reference (bare handle, `@handle`, or profile URL)
    /// to a stable identifier.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::NotFound`] when no resolver recognises the
    /// reference.
    async fn resolve(&self, account_ref: &str) -> FeedResult<AccountId>;

    /// Fetches up to `limit` recent post texts for the account.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Exhausted`] when no endpoint yields usable data.
    async fn fetch_recent(&self, account: &AccountId, limit: usize) -> FeedResult<Vec<String>>;
}

/// Errors returned by feed verifier implementations.
#[derive(Debug, Clone, Error)]
pub enum FeedError {
    /// The account reference could not be mapped to an identifier.
    #[error("could not resolve account reference '{0}'")]
    NotFound(String),
    /// Every candidate endpoint failed or returned unusable data.
    #[error("no feed endpoint returned usable data")]
    Exhausted,
}
