//! The per-round task instance.

use crate::catalog::TaskDescriptor;

const SIMON_PREFIX: &str = "Simon says: ";

/// One round's challenge: a descriptor snapshot plus the Simon-says flag
/// assigned at pick time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskInstance {
    descriptor: TaskDescriptor,
    simon_said: bool,
}

impl TaskInstance {
    /// Creates an instance for a new round.
    #[must_use]
    pub const fn new(descriptor: TaskDescriptor, simon_said: bool) -> Self {
        Self {
            descriptor,
            simon_said,
        }
    }

    /// Returns the underlying descriptor.
    #[must_use]
    pub const fn descriptor(&self) -> &TaskDescriptor {
        &self.descriptor
    }

    /// Returns whether Simon authorized this task.
    #[must_use]
    pub const fn simon_said(&self) -> bool {
        self.simon_said
    }

    /// Status line announced when the round starts.
    #[must_use]
    pub fn announcement(&self) -> String {
        format!(
            "{}{} ({}s)",
            self.prefix(),
            self.descriptor.name(),
            self.descriptor.duration_seconds()
        )
    }

    /// Status line shown on each countdown tick.
    #[must_use]
    pub fn countdown_text(&self, remaining_seconds: u64) -> String {
        format!(
            "{}{} ({remaining_seconds}s left)",
            self.prefix(),
            self.descriptor.name()
        )
    }

    const fn prefix(&self) -> &'static str {
        if self.simon_said { SIMON_PREFIX } else { "" }
    }
}
