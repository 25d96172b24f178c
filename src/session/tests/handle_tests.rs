//! Tests for account handle extraction.

use crate::session::adapters::bluesky::extract_handle;
use rstest::rstest;

#[rstest]
#[case("alice.bsky.social")]
#[case("@alice.bsky.social")]
#[case("https://bsky.app/profile/alice.bsky.social")]
#[case("https://bsky.app/profile/alice.bsky.social/")]
#[case("  alice.bsky.social  ")]
fn every_reference_form_yields_the_bare_handle(#[case] reference: &str) {
    assert_eq!(extract_handle(reference), "alice.bsky.social");
}

#[rstest]
fn urls_without_a_profile_segment_fall_back_to_the_last_segment() {
    assert_eq!(
        extract_handle("https://example.com/users/bob.example"),
        "bob.example"
    );
}

#[rstest]
fn a_bare_host_url_passes_through() {
    assert_eq!(extract_handle("https://bsky.app"), "https://bsky.app");
}

#[rstest]
fn unparseable_references_pass_through_trimmed() {
    assert_eq!(extract_handle("  weird://[cruft  "), "weird://[cruft");
}
