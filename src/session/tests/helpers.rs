//! Shared harness for session tests.
//!
//! Rounds in these tests run at millisecond scale: the tick, the penalty,
//! and the post countdown are all shrunk so whole lifecycles play out in
//! tens of milliseconds of real time.

use crate::catalog::{TaskCatalog, TaskDescriptor, TaskKind};
use crate::config::GameConfig;
use crate::session::adapters::memory::{
    RecordingActions, RecordingActuator, RecordingPresentation, ScriptedFeedVerifier,
    SilentPrompt, StaticEnvironment,
};
use crate::session::domain::{AccountId, RoundOutcome};
use crate::session::ports::{AccountPrompt, EnvironmentProbe};
use crate::session::services::{Collaborators, SessionTiming, TaskSession};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

/// Tick used by monitors and countdowns under test.
pub(super) const TEST_TICK: Duration = Duration::from_millis(5);
/// Penalty duration under test.
pub(super) const TEST_PENALTY: Duration = Duration::from_millis(40);
/// Post countdown, in ticks, under test.
pub(super) const TEST_POST_COUNTDOWN: u64 = 2;

/// A session wired to recording doubles.
pub(super) struct Harness {
    pub session: TaskSession,
    pub actuator: Arc<RecordingActuator>,
    pub environment: Arc<StaticEnvironment>,
    pub presentation: Arc<RecordingPresentation>,
    pub actions: Arc<RecordingActions>,
    pub verifier: Arc<ScriptedFeedVerifier>,
}

pub(super) const fn timing() -> SessionTiming {
    SessionTiming {
        tick: TEST_TICK,
        penalty: TEST_PENALTY,
        post_countdown_seconds: TEST_POST_COUNTDOWN,
    }
}

/// Builds a harness around a scripted verifier and optional stored account.
pub(super) fn harness_with(verifier: ScriptedFeedVerifier, account: Option<&str>) -> Harness {
    harness_with_prompt(verifier, account, Arc::new(SilentPrompt))
}

/// Builds a session over an arbitrary probe, with recording doubles for the
/// rest; used with mock probes.
pub(super) fn session_with_probe(probe: Arc<dyn EnvironmentProbe>) -> TaskSession {
    let catalog = TaskCatalog::new(vec![generic_task("Placeholder", 0)])
        .expect("the fixture catalogue is non-empty");
    TaskSession::new(
        catalog,
        Collaborators {
            actuator: Arc::new(RecordingActuator::new()),
            probe,
            verifier: Arc::new(ScriptedFeedVerifier::resolution_fails()),
            presentation: Arc::new(RecordingPresentation::new()),
            actions: Arc::new(RecordingActions::new()),
            prompt: Arc::new(SilentPrompt),
        },
        timing(),
        GameConfig::default(),
    )
}

/// Builds a harness with an explicit prompt double.
pub(super) fn harness_with_prompt(
    scripted: ScriptedFeedVerifier,
    account: Option<&str>,
    prompt: Arc<dyn AccountPrompt>,
) -> Harness {
    let actuator = Arc::new(RecordingActuator::new());
    let environment = Arc::new(StaticEnvironment::new());
    let presentation = Arc::new(RecordingPresentation::new());
    let actions = Arc::new(RecordingActions::new());
    let verifier = Arc::new(scripted);
    let catalog = TaskCatalog::new(vec![generic_task("Placeholder", 0)])
        .expect("the fixture catalogue is non-empty");
    let config = account.map_or_else(GameConfig::default, GameConfig::with_account);
    let session = TaskSession::new(
        catalog,
        Collaborators {
            actuator: Arc::<RecordingActuator>::clone(&actuator),
            probe: Arc::<StaticEnvironment>::clone(&environment),
            verifier: Arc::<ScriptedFeedVerifier>::clone(&verifier),
            presentation: Arc::<RecordingPresentation>::clone(&presentation),
            actions: Arc::<RecordingActions>::clone(&actions),
            prompt,
        },
        timing(),
        config,
    );
    Harness {
        session,
        actuator,
        environment,
        presentation,
        actions,
        verifier,
    }
}

/// Harness with a verifier nothing exercises.
pub(super) fn harness() -> Harness {
    harness_with(ScriptedFeedVerifier::resolution_fails(), None)
}

pub(super) fn generic_task(name: &str, duration: u64) -> TaskDescriptor {
    TaskDescriptor::new(name, duration, TaskKind::Generic)
}

pub(super) fn window_task(name: &str, duration: u64, title: &str) -> TaskDescriptor {
    TaskDescriptor::new(name, duration, TaskKind::Generic).with_window_title(title)
}

pub(super) fn bluesky_task(post_text: &str) -> TaskDescriptor {
    TaskDescriptor::new("Post the phrase", 0, TaskKind::BlueskyPost).with_post_text(post_text)
}

pub(super) fn account() -> AccountId {
    AccountId::new("did:plc:abc123")
}

/// Sleeps long enough for `ticks` timer ticks to elapse.
pub(super) async fn settle(ticks: u64) {
    sleep(TEST_TICK * u32::try_from(ticks).unwrap_or(u32::MAX) + Duration::from_millis(10)).await;
}

/// Polls until the session records an outcome or the budget runs out.
pub(super) async fn wait_for_outcome(harness: &Harness) -> Option<RoundOutcome> {
    for _ in 0..100_u32 {
        if let Some(outcome) = harness.session.round_outcome() {
            return Some(outcome);
        }
        sleep(TEST_TICK).await;
    }
    None
}

/// Polls until the actuator has returned to rest, i.e. the penalty (if any)
/// has run its course.
pub(super) async fn wait_for_actuator_idle(harness: &Harness) -> bool {
    for _ in 0..100_u32 {
        if harness.actuator.level() == 0 {
            return true;
        }
        sleep(TEST_TICK).await;
    }
    false
}
