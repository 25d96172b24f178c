//! HTTP implementation of the social feed verifier port.

use super::extract_handle;
use crate::session::domain::AccountId;
use crate::session::ports::{FeedError, FeedResult, SocialFeedVerifier};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Hosts tried, in order, for handle resolution.
const RESOLVER_BASES: [&str; 3] = [
    "https://bsky.app",
    "https://bsky.social",
    "https://public.bsky.social",
];

/// Additional hosts tried for the author feed; the public relays answer
/// unauthenticated where the primary hosts often do not.
const EXTRA_FEED_BASES: [&str; 2] = ["https://public.bsky.app", "https://public.api.bsky.app"];

const RESOLVE_PATH: &str = "/xrpc/com.atproto.identity.resolveHandle";
const FEED_PATH: &str = "/xrpc/app.bsky.feed.getAuthorFeed";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(8);

#[derive(Debug, Deserialize)]
struct ResolveHandleResponse {
    did: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct AuthorFeedResponse {
    #[serde(default)]
    feed: Vec<FeedItem>,
}

#[derive(Debug, Default, Deserialize)]
struct FeedItem {
    #[serde(default)]
    post: FeedPost,
}

#[derive(Debug, Default, Deserialize)]
struct FeedPost {
    text: Option<String>,
    record: Option<FeedRecord>,
}

#[derive(Debug, Deserialize)]
struct FeedRecord {
    text: Option<String>,
}

impl FeedPost {
    /// Post text, falling back from the flat field to the nested record.
    fn into_text(self) -> String {
        self.text
            .or_else(|| self.record.and_then(|record| record.text))
            .unwrap_or_default()
    }
}

/// Feed verifier walking the public Bluesky endpoints.
#[derive(Debug, Clone)]
pub struct BlueskyFeedVerifier {
    http: reqwest::Client,
    resolver_bases: Vec<String>,
    feed_bases: Vec<String>,
}

impl BlueskyFeedVerifier {
    /// Creates a verifier over the canonical public hosts.
    #[must_use]
    pub fn new() -> Self {
        let resolver_bases = RESOLVER_BASES.iter().map(|base| (*base).to_owned()).collect();
        let feed_bases = RESOLVER_BASES
            .iter()
            .chain(EXTRA_FEED_BASES.iter())
            .map(|base| (*base).to_owned())
            .collect();
        Self::with_bases(resolver_bases, feed_bases)
    }

    /// Creates a verifier over explicit base URLs, for tests and relays.
    #[must_use]
    pub fn with_bases(resolver_bases: Vec<String>, feed_bases: Vec<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|err| {
                warn!(%err, "falling back to a default HTTP client");
                reqwest::Client::new()
            });
        Self {
            http,
            resolver_bases,
            feed_bases,
        }
    }

    async fn try_resolve(&self, endpoint: &str, handle: &str) -> Option<AccountId> {
        let response = match self
            .http
            .get(endpoint)
            .query(&[("handle", handle)])
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                debug!(endpoint, %err, "resolver request failed");
                return None;
            }
        };
        if !response.status().is_success() {
            debug!(endpoint, status = %response.status(), "resolver refused the handle");
            return None;
        }
        match response.json::<ResolveHandleResponse>().await {
            Ok(body) => {
                let did = body.did.filter(|did| !did.is_empty())?;
                debug!(endpoint, %did, "resolved handle");
                Some(AccountId::new(did))
            }
            Err(err) => {
                debug!(endpoint, %err, "could not parse resolver response");
                None
            }
        }
    }

    async fn try_feed(&self, endpoint: &str, account: &AccountId, limit: usize) -> Option<Vec<String>> {
        let limit_value = limit.to_string();
        let response = match self
            .http
            .get(endpoint)
            .query(&[("actor", account.as_str()), ("limit", limit_value.as_str())])
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                debug!(endpoint, %err, "feed request failed");
                return None;
            }
        };
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            // Logged but not distinguished from other failures upstream.
            warn!(endpoint, %status, "authentication required");
            return None;
        }
        if !status.is_success() {
            debug!(endpoint, %status, "feed endpoint returned a non-success status");
            return None;
        }
        match response.json::<AuthorFeedResponse>().await {
            Ok(body) => Some(
                body.feed
                    .into_iter()
                    .map(|item| item.post.into_text())
                    .collect(),
            ),
            Err(err) => {
                debug!(endpoint, %err, "could not parse feed response");
                None
            }
        }
    }
}

impl Default for BlueskyFeedVerifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SocialFeedVerifier for BlueskyFeedVerifier {
    async fn resolve(&self, account_ref: &str) -> FeedResult<AccountId> {
        let handle = extract_handle(account_ref);
        for base in &self.resolver_bases {
            let endpoint = format!("{base}{RESOLVE_PATH}");
            if let Some(account) = self.try_resolve(&endpoint, &handle).await {
                return Ok(account);
            }
        }
        Err(FeedError::NotFound(handle))
    }

    async fn fetch_recent(&self, account: &AccountId, limit: usize) -> FeedResult<Vec<String>> {
        for base in &self.feed_bases {
            let endpoint = format!("{base}{FEED_PATH}");
            if let Some(posts) = self.try_feed(&endpoint, account, limit).await {
                debug!(endpoint, count = posts.len(), "fetched author feed");
                return Ok(posts);
            }
        }
        Err(FeedError::Exhausted)
    }
}
