//! Tests for the post-verification flow.

use super::helpers::{
    account, bluesky_task, harness_with, harness_with_prompt, settle, wait_for_actuator_idle,
    wait_for_outcome,
};
use crate::catalog::{TaskDescriptor, TaskKind};
use crate::session::adapters::memory::{ScriptedFeedVerifier, StaticPrompt};
use crate::session::domain::{FailureReason, RoundOutcome};
use eyre::{bail, ensure};
use rstest::rstest;
use std::sync::Arc;

#[rstest]
#[tokio::test]
async fn matching_post_resolves_the_round_successfully() -> eyre::Result<()> {
    let harness = harness_with(
        ScriptedFeedVerifier::with_posts(
            account(),
            vec!["something else".to_owned(), "Well, Hello World! indeed".to_owned()],
        ),
        Some("alice.bsky.social"),
    );
    harness
        .session
        .start_round(bluesky_task("hello world"), true)
        .await?;

    harness.session.on_open_action().await;

    let Some(outcome) = wait_for_outcome(&harness).await else {
        bail!("the round never resolved");
    };
    ensure!(outcome == RoundOutcome::Success);
    ensure!(harness.verifier.resolve_calls() == 1);
    ensure!(harness.verifier.fetch_calls() == 1);
    ensure!(harness.actuator.level() == 0);
    // The status passed through the checking phase on the way.
    ensure!(
        harness
            .presentation
            .statuses()
            .iter()
            .any(|status| status == "Simon is checking...")
    );
    Ok(())
}

#[rstest]
#[tokio::test]
async fn post_text_is_copied_by_the_visible_action() -> eyre::Result<()> {
    let harness = harness_with(
        ScriptedFeedVerifier::with_posts(account(), vec!["hello world".to_owned()]),
        Some("alice.bsky.social"),
    );
    harness
        .session
        .start_round(bluesky_task("hello world"), true)
        .await?;

    harness.session.on_open_action().await;

    ensure!(harness.actions.copied_texts() == vec!["hello world".to_owned()]);
    let _ = wait_for_outcome(&harness).await;
    Ok(())
}

#[rstest]
#[tokio::test]
async fn profile_open_is_requested_when_the_task_asks() -> eyre::Result<()> {
    let harness = harness_with(
        ScriptedFeedVerifier::with_posts(account(), vec!["hello world".to_owned()]),
        Some("alice.bsky.social"),
    );
    let descriptor = TaskDescriptor::new("Post the phrase", 0, TaskKind::BlueskyPost)
        .with_post_text("hello world")
        .with_profile_open();
    harness.session.start_round(descriptor, true).await?;

    harness.session.on_open_action().await;

    ensure!(harness.actions.opened_links() == vec!["https://bsky.app".to_owned()]);
    let _ = wait_for_outcome(&harness).await;
    Ok(())
}

#[rstest]
#[tokio::test]
async fn fetch_failure_fails_the_round_and_runs_the_penalty() -> eyre::Result<()> {
    let harness = harness_with(
        ScriptedFeedVerifier::fetch_fails(account()),
        Some("alice.bsky.social"),
    );
    harness
        .session
        .start_round(bluesky_task("hello world"), true)
        .await?;

    harness.session.on_open_action().await;

    let Some(outcome) = wait_for_outcome(&harness).await else {
        bail!("the round never resolved");
    };
    ensure!(outcome == RoundOutcome::Failure(FailureReason::FetchFailure));
    ensure!(harness.actuator.level() == 100);
    ensure!(harness.presentation.inputs_enabled() == Some(false));

    ensure!(wait_for_actuator_idle(&harness).await);
    settle(1).await;
    ensure!(harness.presentation.inputs_enabled() == Some(true));
    Ok(())
}

#[rstest]
#[tokio::test]
async fn absent_text_fails_the_round_as_no_match() -> eyre::Result<()> {
    let harness = harness_with(
        ScriptedFeedVerifier::with_posts(account(), vec!["unrelated musings".to_owned()]),
        Some("alice.bsky.social"),
    );
    harness
        .session
        .start_round(bluesky_task("hello world"), true)
        .await?;

    harness.session.on_open_action().await;

    let Some(outcome) = wait_for_outcome(&harness).await else {
        bail!("the round never resolved");
    };
    ensure!(outcome == RoundOutcome::Failure(FailureReason::NoMatch));
    Ok(())
}

#[rstest]
#[tokio::test]
async fn unresolvable_account_fails_the_round() -> eyre::Result<()> {
    let harness = harness_with(ScriptedFeedVerifier::resolution_fails(), None);
    harness
        .session
        .start_round(bluesky_task("hello world"), true)
        .await?;

    harness.session.on_open_action().await;

    let Some(outcome) = wait_for_outcome(&harness).await else {
        bail!("the round never resolved");
    };
    ensure!(outcome == RoundOutcome::Failure(FailureReason::ResolutionFailure));
    Ok(())
}

#[rstest]
#[tokio::test]
async fn configured_account_is_resolved_before_prompting() -> eyre::Result<()> {
    let harness = harness_with(
        ScriptedFeedVerifier::with_posts(account(), vec!["hello world".to_owned()]),
        Some("https://bsky.app/profile/alice.bsky.social"),
    );
    harness
        .session
        .start_round(bluesky_task("hello world"), true)
        .await?;

    harness.session.on_open_action().await;
    let _ = wait_for_outcome(&harness).await;

    ensure!(
        harness.verifier.resolved_refs()
            == vec!["https://bsky.app/profile/alice.bsky.social".to_owned()]
    );
    Ok(())
}

#[rstest]
#[tokio::test]
async fn prompt_answer_is_used_when_no_account_is_configured() -> eyre::Result<()> {
    let harness = harness_with_prompt(
        ScriptedFeedVerifier::with_posts(account(), vec!["hello world".to_owned()]),
        None,
        Arc::new(StaticPrompt::new("@alice.bsky.social")),
    );
    harness
        .session
        .start_round(bluesky_task("hello world"), true)
        .await?;

    harness.session.on_open_action().await;

    let Some(outcome) = wait_for_outcome(&harness).await else {
        bail!("the round never resolved");
    };
    ensure!(outcome == RoundOutcome::Success);
    ensure!(harness.verifier.resolved_refs() == vec!["@alice.bsky.social".to_owned()]);
    Ok(())
}

#[rstest]
#[tokio::test]
async fn blank_post_text_fails_verification() -> eyre::Result<()> {
    let harness = harness_with(
        ScriptedFeedVerifier::with_posts(account(), vec!["hello world".to_owned()]),
        Some("alice.bsky.social"),
    );
    harness
        .session
        .start_round(bluesky_task("   "), true)
        .await?;

    harness.session.on_open_action().await;

    let Some(outcome) = wait_for_outcome(&harness).await else {
        bail!("the round never resolved");
    };
    ensure!(outcome == RoundOutcome::Failure(FailureReason::NoMatch));
    ensure!(harness.verifier.fetch_calls() == 0);
    Ok(())
}
