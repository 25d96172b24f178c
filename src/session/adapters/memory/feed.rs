//! Scripted in-memory feed verifier.

use crate::session::domain::AccountId;
use crate::session::ports::{FeedError, FeedResult, SocialFeedVerifier};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

/// Feed verifier double with scripted resolution and feed contents.
#[derive(Debug)]
pub struct ScriptedFeedVerifier {
    account: Option<AccountId>,
    posts: Option<Vec<String>>,
    resolve_calls: AtomicUsize,
    fetch_calls: AtomicUsize,
    resolved_refs: Mutex<Vec<String>>,
}

impl ScriptedFeedVerifier {
    /// A verifier that resolves to `account` and serves the given posts.
    #[must_use]
    pub fn with_posts(account: AccountId, posts: Vec<String>) -> Self {
        Self {
            account: Some(account),
            posts: Some(posts),
            resolve_calls: AtomicUsize::new(0),
            fetch_calls: AtomicUsize::new(0),
            resolved_refs: Mutex::new(Vec::new()),
        }
    }

    /// A verifier whose resolution always fails.
    #[must_use]
    pub fn resolution_fails() -> Self {
        Self {
            account: None,
            posts: None,
            resolve_calls: AtomicUsize::new(0),
            fetch_calls: AtomicUsize::new(0),
            resolved_refs: Mutex::new(Vec::new()),
        }
    }

    /// A verifier that resolves but whose every feed fetch fails.
    #[must_use]
    pub fn fetch_fails(account: AccountId) -> Self {
        Self {
            account: Some(account),
            posts: None,
            resolve_calls: AtomicUsize::new(0),
            fetch_calls: AtomicUsize::new(0),
            resolved_refs: Mutex::new(Vec::new()),
        }
    }

    /// How many times resolution was attempted.
    #[must_use]
    pub fn resolve_calls(&self) -> usize {
        self.resolve_calls.load(Ordering::Acquire)
    }

    /// How many times the feed was fetched.
    #[must_use]
    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::Acquire)
    }

    /// Every account reference passed to resolution, in order.
    #[must_use]
    pub fn resolved_refs(&self) -> Vec<String> {
        self.resolved_refs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl SocialFeedVerifier for ScriptedFeedVerifier {
    async fn resolve(&self, account_ref: &str) -> FeedResult<AccountId> {
        self.resolve_calls.fetch_add(1, Ordering::AcqRel);
        self.resolved_refs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(account_ref.to_owned());
        self.account
            .clone()
            .ok_or_else(|| FeedError::NotFound(account_ref.to_owned()))
    }

    async fn fetch_recent(&self, _account: &AccountId, _limit: usize) -> FeedResult<Vec<String>> {
        self.fetch_calls.fetch_add(1, Ordering::AcqRel);
        self.posts.clone().ok_or(FeedError::Exhausted)
    }
}
