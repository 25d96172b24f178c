//! Round resolution outcomes and the failure taxonomy.

use std::fmt;

/// Why a round failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureReason {
    /// The player acted against the Simon-says flag: obeyed an unauthorized
    /// command, or ignored a valid one.
    RuleViolation,
    /// The required window closed before the countdown reached zero.
    EnvironmentLost,
    /// The account reference could not be mapped to a stable identifier.
    ResolutionFailure,
    /// No feed endpoint returned usable posts.
    FetchFailure,
    /// The feed was fetched but the expected text was absent.
    NoMatch,
    /// The task's visible action could not be performed.
    ActionFailed,
}

impl FailureReason {
    /// Returns a short machine-friendly label, used in log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RuleViolation => "rule_violation",
            Self::EnvironmentLost => "environment_lost",
            Self::ResolutionFailure => "resolution_failure",
            Self::FetchFailure => "fetch_failure",
            Self::NoMatch => "no_match",
            Self::ActionFailed => "action_failed",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal result of one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundOutcome {
    /// The player complied with the round's rules.
    Success,
    /// The player failed; the penalty protocol follows.
    Failure(FailureReason),
}
