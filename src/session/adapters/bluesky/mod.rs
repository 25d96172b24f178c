//! Bluesky feed verifier over public, unauthenticated HTTP endpoints.

mod handle;
mod verifier;

pub use handle::extract_handle;
pub use verifier::BlueskyFeedVerifier;
