//! Behavioural tests for the Bluesky feed verifier over a mock HTTP
//! surface: host fallback, handle extraction on the wire, feed shape
//! tolerance, and the auth-required path.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use serde_json::json;
use simonsays::session::adapters::bluesky::BlueskyFeedVerifier;
use simonsays::session::domain::AccountId;
use simonsays::session::ports::{FeedError, SocialFeedVerifier};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const RESOLVE_PATH: &str = "/xrpc/com.atproto.identity.resolveHandle";
const FEED_PATH: &str = "/xrpc/app.bsky.feed.getAuthorFeed";

fn account() -> AccountId {
    AccountId::new("did:plc:abc123")
}

#[tokio::test]
async fn resolve_returns_the_first_host_that_answers() {
    let failing = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RESOLVE_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&failing)
        .await;

    let answering = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RESOLVE_PATH))
        .and(query_param("handle", "alice.bsky.social"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"did": "did:plc:abc123"})))
        .mount(&answering)
        .await;

    let verifier = BlueskyFeedVerifier::with_bases(vec![failing.uri(), answering.uri()], vec![]);
    let resolved = verifier
        .resolve("alice.bsky.social")
        .await
        .expect("the second host answers");
    assert_eq!(resolved, account());
}

#[tokio::test]
async fn resolve_extracts_the_handle_from_a_profile_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RESOLVE_PATH))
        .and(query_param("handle", "alice.bsky.social"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"did": "did:plc:abc123"})))
        .mount(&server)
        .await;

    let verifier = BlueskyFeedVerifier::with_bases(vec![server.uri()], vec![]);
    let resolved = verifier
        .resolve("https://bsky.app/profile/alice.bsky.social")
        .await
        .expect("the profile URL resolves");
    assert_eq!(resolved, account());
}

#[tokio::test]
async fn resolve_fails_when_no_host_recognises_the_handle() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RESOLVE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let verifier = BlueskyFeedVerifier::with_bases(vec![server.uri()], vec![]);
    let result = verifier.resolve("@nobody.example").await;
    assert!(matches!(result, Err(FeedError::NotFound(handle)) if handle == "nobody.example"));
}

#[tokio::test]
async fn fetch_reads_flat_and_nested_post_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FEED_PATH))
        .and(query_param("actor", "did:plc:abc123"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "feed": [
                {"post": {"text": "top-level text"}},
                {"post": {"record": {"text": "nested record text"}}},
                {"post": {}}
            ]
        })))
        .mount(&server)
        .await;

    let verifier = BlueskyFeedVerifier::with_bases(vec![], vec![server.uri()]);
    let posts = verifier
        .fetch_recent(&account(), 10)
        .await
        .expect("the feed endpoint answers");
    assert_eq!(
        posts,
        vec![
            "top-level text".to_owned(),
            "nested record text".to_owned(),
            String::new()
        ]
    );
}

#[tokio::test]
async fn fetch_falls_past_auth_required_endpoints() {
    let authed = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FEED_PATH))
        .respond_with(ResponseTemplate::new(403))
        .mount(&authed)
        .await;

    let open = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FEED_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "feed": [{"post": {"text": "hello world"}}]
        })))
        .mount(&open)
        .await;

    let verifier = BlueskyFeedVerifier::with_bases(vec![], vec![authed.uri(), open.uri()]);
    let posts = verifier
        .fetch_recent(&account(), 10)
        .await
        .expect("the public relay answers");
    assert_eq!(posts, vec!["hello world".to_owned()]);
}

#[tokio::test]
async fn fetch_fails_when_every_endpoint_is_unusable() {
    let broken = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(FEED_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&broken)
        .await;

    let verifier = BlueskyFeedVerifier::with_bases(vec![], vec![broken.uri()]);
    let result = verifier.fetch_recent(&account(), 10).await;
    assert!(matches!(result, Err(FeedError::Exhausted)));
}
