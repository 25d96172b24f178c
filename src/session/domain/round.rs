//! Shared state for one round in flight.

use super::{AccountId, RoundOutcome, TaskInstance};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, OnceLock, PoisonError};

/// Shared handle to one round's mutable state.
///
/// Monitor, countdown, and verification routines each hold a clone of the
/// round's [`std::sync::Arc`] taken at spawn time, so a stale routine for a
/// replaced round can never touch its successor. `active` is polled
/// cooperatively each tick; `outcome` is a write-once cell, making
/// resolution idempotent no matter how many racing paths complete.
#[derive(Debug)]
pub struct Round {
    instance: TaskInstance,
    active: AtomicBool,
    outcome: OnceLock<RoundOutcome>,
    resolved_account: Mutex<Option<AccountId>>,
}

impl Round {
    /// Creates an active round for the given instance.
    #[must_use]
    pub fn new(instance: TaskInstance) -> Self {
        Self {
            instance,
            active: AtomicBool::new(true),
            outcome: OnceLock::new(),
            resolved_account: Mutex::new(None),
        }
    }

    /// Returns the instance this round plays.
    #[must_use]
    pub const fn instance(&self) -> &TaskInstance {
        &self.instance
    }

    /// Returns whether the round is still in flight.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Clears the active flag; polling routines exit on their next tick.
    pub fn deactivate(&self) {
        self.active.store(false, Ordering::Release);
    }

    /// Records the round's outcome. Returns `true` for the first caller
    /// only; later callers lose the race and must not act further.
    #[must_use]
    pub fn record_outcome(&self, outcome: RoundOutcome) -> bool {
        self.outcome.set(outcome).is_ok()
    }

    /// Returns the recorded outcome, if the round has resolved.
    #[must_use]
    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.outcome.get().copied()
    }

    /// Returns the account identifier resolved earlier in this round.
    #[must_use]
    pub fn resolved_account(&self) -> Option<AccountId> {
        self.resolved_account
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Caches the resolved account identifier for the rest of the round.
    pub fn store_resolved_account(&self, account: AccountId) {
        *self
            .resolved_account
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(account);
    }
}
