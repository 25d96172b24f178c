//! The round lifecycle state machine.
//!
//! [`TaskSession`] owns the current round and coordinates its collaborators:
//! random task selection, the Simon-says compliance check, environment
//! monitoring, countdown timers, social-post verification, and the penalty
//! protocol. Monitor and countdown routines run on their own tokio tasks,
//! snapshot their round at spawn time, and exit cooperatively when the round
//! leaves flight; resolution itself is a write-once race on the round's
//! outcome cell, so exactly one of the competing paths wins.

use crate::catalog::{TaskCatalog, TaskDescriptor, TaskKind};
use crate::config::GameConfig;
use crate::session::domain::{
    AccountId, FailureReason, Round, RoundOutcome, SessionError, TaskInstance,
};
use crate::session::ports::{
    AccountPrompt, ActionResult, Actuator, EnvironmentProbe, PresentationPort, SocialFeedVerifier,
    TaskActions,
};
use rand::RngExt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Actuator level raised while a round is announced and unstarted.
const ANNOUNCE_LEVEL: u8 = 30;
/// Actuator level held for the penalty duration after a failure.
const PENALTY_LEVEL: u8 = 100;
/// How many recent posts the verifier inspects.
const FEED_FETCH_LIMIT: usize = 10;
/// Profile page opened by the visible action of post tasks that request it.
const PROFILE_URL: &str = "https://bsky.app";
/// Status line shown while verification is in flight.
const CHECKING_STATUS: &str = "Simon is checking...";

/// Timer configuration for a session.
///
/// The defaults match the game's rules (1 Hz polling, fixed 10-second
/// penalty, fixed 10-second post countdown); tests shrink them to
/// millisecond scale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTiming {
    /// Interval between monitor polls and countdown ticks.
    pub tick: Duration,
    /// How long the penalty holds full intensity after a failure.
    pub penalty: Duration,
    /// Countdown, in ticks, between the visible post action and
    /// verification.
    pub post_countdown_seconds: u64,
}

impl Default for SessionTiming {
    fn default() -> Self {
        Self {
            tick: Duration::from_secs(1),
            penalty: Duration::from_secs(10),
            post_countdown_seconds: 10,
        }
    }
}

/// The session's injected collaborators.
#[derive(Clone)]
pub struct Collaborators {
    /// Feedback device.
    pub actuator: Arc<dyn Actuator>,
    /// Host window probe.
    pub probe: Arc<dyn EnvironmentProbe>,
    /// Social feed verifier.
    pub verifier: Arc<dyn SocialFeedVerifier>,
    /// Status text and input-enablement sink.
    pub presentation: Arc<dyn PresentationPort>,
    /// Visible action hooks.
    pub actions: Arc<dyn TaskActions>,
    /// Interactive account prompt.
    pub prompt: Arc<dyn AccountPrompt>,
}

/// The round lifecycle state machine.
///
/// Cloning is cheap; clones share the same session.
#[derive(Clone)]
pub struct TaskSession {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    catalog: TaskCatalog,
    collaborators: Collaborators,
    timing: SessionTiming,
    config: GameConfig,
    current: Mutex<Option<Arc<Round>>>,
}

impl TaskSession {
    /// Creates a session over the given catalogue and collaborators.
    ///
    /// Must be called from within a tokio runtime; the session spawns its
    /// monitor, countdown, and penalty routines there.
    #[must_use]
    pub fn new(
        catalog: TaskCatalog,
        collaborators: Collaborators,
        timing: SessionTiming,
        config: GameConfig,
    ) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                catalog,
                collaborators,
                timing,
                config,
                current: Mutex::new(None),
            }),
        }
    }

    /// Picks a uniformly random task, flips the Simon-says coin, and starts
    /// a round with it.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::RoundInProgress`] while a round is active.
    pub async fn pick_task(&self) -> Result<(), SessionError> {
        let (descriptor, simon_said) = {
            let mut rng = rand::rng();
            let descriptor = self.inner.catalog.pick(&mut rng).clone();
            (descriptor, rng.random_bool(0.5))
        };
        self.start_round(descriptor, simon_said).await
    }

    /// Starts a round for a specific descriptor and Simon-says flag.
    ///
    /// This is the deterministic entry [`TaskSession::pick_task`] delegates
    /// to after drawing its randomness.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::RoundInProgress`] while a round is active.
    pub async fn start_round(
        &self,
        descriptor: TaskDescriptor,
        simon_said: bool,
    ) -> Result<(), SessionError> {
        let round = self
            .inner
            .install_round(TaskInstance::new(descriptor, simon_said))?;
        self.inner.announce(&round).await;
        Ok(())
    }

    /// Handles the player pressing the "open / do task" control.
    ///
    /// A no-op when no round is active. Acting on a command Simon did not
    /// give is an instant failure; otherwise the visible action runs and the
    /// round proceeds to its countdown or monitor.
    pub async fn on_open_action(&self) {
        SessionInner::open_action(&self.inner).await;
    }

    /// Handles the player pressing the "do nothing" control.
    ///
    /// A no-op when no round is active. Correctly ignoring an unauthorized
    /// command succeeds; ignoring a valid one fails.
    pub async fn on_do_nothing_action(&self) {
        SessionInner::do_nothing_action(&self.inner).await;
    }

    /// Deactivates any round in flight and stops the actuator.
    ///
    /// Spawned routines observe the cleared flag on their next tick and exit
    /// without recording an outcome.
    pub async fn shutdown(&self) {
        let round = self.inner.lock_current().take();
        if let Some(active) = round {
            info!(
                task = active.instance().descriptor().name(),
                "shutting down with a round in flight"
            );
            active.deactivate();
        }
        self.inner.stop_actuator().await;
    }

    /// Returns whether a round is currently in flight.
    #[must_use]
    pub fn is_round_active(&self) -> bool {
        self.inner.active_round().is_some()
    }

    /// Returns the outcome of the current round, once resolved.
    #[must_use]
    pub fn round_outcome(&self) -> Option<RoundOutcome> {
        self.inner
            .lock_current()
            .as_ref()
            .and_then(|round| round.outcome())
    }

    /// Returns a snapshot of the instance the current round plays.
    #[must_use]
    pub fn current_instance(&self) -> Option<TaskInstance> {
        self.inner
            .lock_current()
            .as_ref()
            .map(|round| round.instance().clone())
    }
}

impl SessionInner {
    fn lock_current(&self) -> MutexGuard<'_, Option<Arc<Round>>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn active_round(&self) -> Option<Arc<Round>> {
        self.lock_current()
            .as_ref()
            .filter(|round| round.is_active())
            .cloned()
    }

    /// Replaces the current round, rejecting the pick while one is active.
    fn install_round(&self, instance: TaskInstance) -> Result<Arc<Round>, SessionError> {
        let mut current = self.lock_current();
        if current.as_ref().is_some_and(|round| round.is_active()) {
            return Err(SessionError::RoundInProgress);
        }
        let round = Arc::new(Round::new(instance));
        *current = Some(Arc::clone(&round));
        Ok(round)
    }

    async fn announce(self: &Arc<Self>, round: &Arc<Round>) {
        let instance = round.instance();
        info!(
            task = instance.descriptor().name(),
            simon = instance.simon_said(),
            "round started"
        );
        self.collaborators
            .presentation
            .set_status_text(&instance.announcement())
            .await;
        self.set_actuator_level(ANNOUNCE_LEVEL).await;

        let descriptor = instance.descriptor();
        if descriptor.duration_seconds() > 0 && descriptor.kind() != TaskKind::BlueskyPost {
            self.spawn_monitor(Arc::clone(round));
        } else {
            // Post tasks and zero-duration tasks wait for the player's
            // response; inputs stay live.
            self.collaborators.presentation.set_inputs_enabled(true).await;
        }
    }

    async fn open_action(self: &Arc<Self>) {
        let Some(round) = self.active_round() else {
            return;
        };
        if !round.instance().simon_said() {
            warn!("simon didn't say; acting is a rule violation");
            self.finish(&round, RoundOutcome::Failure(FailureReason::RuleViolation))
                .await;
            return;
        }
        if let Err(err) = self.perform_visible_action(&round).await {
            warn!(%err, "visible action failed");
            self.finish(&round, RoundOutcome::Failure(FailureReason::ActionFailed))
                .await;
            return;
        }
        let descriptor = round.instance().descriptor().clone();
        if descriptor.kind() == TaskKind::BlueskyPost {
            // No window to probe for a post; a fixed countdown leads straight
            // to verification.
            self.spawn_countdown(Arc::clone(&round), self.timing.post_countdown_seconds);
        } else if descriptor.duration_seconds() > 0 {
            self.spawn_monitor(Arc::clone(&round));
        }
    }

    async fn do_nothing_action(self: &Arc<Self>) {
        let Some(round) = self.active_round() else {
            return;
        };
        if round.instance().simon_said() {
            warn!("a valid command was ignored");
            self.finish(&round, RoundOutcome::Failure(FailureReason::RuleViolation))
                .await;
        } else {
            info!("correctly ignored an unauthorized command");
            self.finish(&round, RoundOutcome::Success).await;
        }
    }

    async fn perform_visible_action(&self, round: &Round) -> ActionResult<()> {
        let descriptor = round.instance().descriptor();
        match descriptor.kind() {
            TaskKind::OpenLink => {
                if let Some(link) = descriptor.link() {
                    info!(link, "opening task link");
                    self.collaborators.actions.open_link(link).await?;
                }
            }
            TaskKind::BlueskyPost => {
                if let Some(text) = descriptor.post_text() {
                    // Clipboard trouble is not worth failing the round over.
                    if let Err(err) = self.collaborators.actions.copy_text(text).await {
                        warn!(%err, "could not copy post text");
                    }
                }
                if descriptor.opens_profile() {
                    info!("opening profile page");
                    self.collaborators.actions.open_link(PROFILE_URL).await?;
                }
            }
            TaskKind::Generic => {}
        }
        Ok(())
    }

    fn spawn_monitor(self: &Arc<Self>, round: Arc<Round>) {
        let inner = Arc::clone(self);
        drop(tokio::spawn(async move {
            inner.monitor_and_countdown(round).await;
        }));
    }

    fn spawn_countdown(self: &Arc<Self>, round: Arc<Round>, seconds: u64) {
        let inner = Arc::clone(self);
        drop(tokio::spawn(async move {
            inner.countdown(&round, seconds).await;
        }));
    }

    /// Polls the environment until the required window appears, then runs
    /// the countdown. A task without a window requirement is never detected;
    /// the poll then runs until the round leaves flight.
    async fn monitor_and_countdown(self: Arc<Self>, round: Arc<Round>) {
        while round.is_active() {
            if self.window_visible(&round).await {
                info!(
                    task = round.instance().descriptor().name(),
                    "task detected, starting countdown"
                );
                self.stop_actuator().await;
                let duration = round.instance().descriptor().duration_seconds();
                if duration > 0 {
                    self.countdown(&round, duration).await;
                }
                return;
            }
            sleep(self.timing.tick).await;
        }
    }

    /// Ticks the visible counter down to zero, re-probing the environment on
    /// each tick when the task requires a window. Exits silently when the
    /// round has already resolved elsewhere.
    async fn countdown(self: &Arc<Self>, round: &Arc<Round>, seconds: u64) {
        for remaining in (1..=seconds).rev() {
            if !round.is_active() {
                return;
            }
            self.collaborators
                .presentation
                .set_status_text(&round.instance().countdown_text(remaining))
                .await;
            if round.instance().descriptor().window_title().is_some()
                && !self.window_visible(round).await
            {
                warn!("required window closed before time was up");
                self.finish(round, RoundOutcome::Failure(FailureReason::EnvironmentLost))
                    .await;
                return;
            }
            sleep(self.timing.tick).await;
        }
        if !round.is_active() {
            return;
        }
        if round.instance().descriptor().kind() == TaskKind::BlueskyPost {
            self.verify(round).await;
        } else {
            self.finish(round, RoundOutcome::Success).await;
        }
    }

    async fn window_visible(&self, round: &Round) -> bool {
        let Some(title) = round.instance().descriptor().window_title() else {
            return false;
        };
        self.collaborators.probe.is_visible(title).await
    }

    /// Verifies that the expected post was published before resolving the
    /// round.
    async fn verify(self: &Arc<Self>, round: &Arc<Round>) {
        self.collaborators
            .presentation
            .set_status_text(CHECKING_STATUS)
            .await;

        let post_text = round
            .instance()
            .descriptor()
            .post_text()
            .map(str::trim)
            .filter(|text| !text.is_empty());
        let Some(expected) = post_text else {
            warn!("verification skipped: the task has no post text");
            self.finish(round, RoundOutcome::Failure(FailureReason::NoMatch))
                .await;
            return;
        };

        let Some(account) = self.resolve_account(round).await else {
            self.finish(
                round,
                RoundOutcome::Failure(FailureReason::ResolutionFailure),
            )
            .await;
            return;
        };

        let posts = match self
            .collaborators
            .verifier
            .fetch_recent(&account, FEED_FETCH_LIMIT)
            .await
        {
            Ok(posts) if posts.is_empty() => {
                warn!(%account, "author feed is empty");
                self.finish(round, RoundOutcome::Failure(FailureReason::FetchFailure))
                    .await;
                return;
            }
            Ok(posts) => posts,
            Err(err) => {
                warn!(%err, "feed fetch failed");
                self.finish(round, RoundOutcome::Failure(FailureReason::FetchFailure))
                    .await;
                return;
            }
        };

        let needle = expected.to_lowercase();
        if posts.iter().any(|post| post.to_lowercase().contains(&needle)) {
            info!(expected, "matching post found");
            self.finish(round, RoundOutcome::Success).await;
        } else {
            warn!(expected, "no matching post found");
            self.finish(round, RoundOutcome::Failure(FailureReason::NoMatch))
                .await;
        }
    }

    /// Resolves the round's account identifier at most once, preferring the
    /// configured account and falling back to the interactive prompt.
    async fn resolve_account(&self, round: &Round) -> Option<AccountId> {
        if let Some(existing) = round.resolved_account() {
            return Some(existing);
        }
        if let Some(handle) = self.config.bluesky_account() {
            debug!(handle, "resolving configured account");
            match self.collaborators.verifier.resolve(handle).await {
                Ok(account) => {
                    round.store_resolved_account(account.clone());
                    return Some(account);
                }
                Err(err) => warn!(%err, handle, "configured account did not resolve"),
            }
        }
        let prompted = self.collaborators.prompt.request_account().await?;
        match self.collaborators.verifier.resolve(&prompted).await {
            Ok(account) => {
                round.store_resolved_account(account.clone());
                Some(account)
            }
            Err(err) => {
                warn!(%err, "prompted account did not resolve");
                None
            }
        }
    }

    /// Resolves the round exactly once; the losing caller of any race is a
    /// no-op. Failure triggers the penalty protocol, which always runs to
    /// completion once started.
    async fn finish(self: &Arc<Self>, round: &Arc<Round>, outcome: RoundOutcome) {
        if !round.record_outcome(outcome) {
            return;
        }
        round.deactivate();
        match outcome {
            RoundOutcome::Success => {
                info!(
                    task = round.instance().descriptor().name(),
                    "round completed correctly"
                );
                self.stop_actuator().await;
                self.collaborators.presentation.set_inputs_enabled(true).await;
            }
            RoundOutcome::Failure(reason) => {
                warn!(
                    task = round.instance().descriptor().name(),
                    reason = reason.as_str(),
                    "round failed"
                );
                self.set_actuator_level(PENALTY_LEVEL).await;
                self.collaborators
                    .presentation
                    .set_status_text(&format!(
                        "Wrong or abandoned! {PENALTY_LEVEL}% for {}s",
                        self.timing.penalty.as_secs()
                    ))
                    .await;
                self.collaborators.presentation.set_inputs_enabled(false).await;
                let inner = Arc::clone(self);
                drop(tokio::spawn(async move {
                    inner.run_penalty().await;
                }));
            }
        }
    }

    async fn run_penalty(&self) {
        sleep(self.timing.penalty).await;
        self.stop_actuator().await;
        self.collaborators.presentation.set_inputs_enabled(true).await;
        info!("penalty finished");
    }

    async fn set_actuator_level(&self, percent: u8) {
        if let Err(err) = self.collaborators.actuator.set_level(percent).await {
            warn!(%err, percent, "actuator unavailable, continuing without feedback");
        }
    }

    async fn stop_actuator(&self) {
        if let Err(err) = self.collaborators.actuator.stop().await {
            warn!(%err, "actuator unavailable, continuing without feedback");
        }
    }
}
