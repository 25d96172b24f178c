//! Catalogue container and uniform random selection.

use super::TaskDescriptor;
use rand::{Rng, RngExt};
use thiserror::Error;

/// Errors returned while constructing a task catalogue.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The descriptor list was empty.
    #[error("the task catalogue must contain at least one task")]
    Empty,
    /// A descriptor had a blank name.
    #[error("task names must not be blank")]
    BlankTaskName,
    /// The catalogue JSON could not be parsed.
    #[error("invalid task catalogue: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Immutable, non-empty collection of task descriptors.
///
/// Non-emptiness is a structural invariant: the first descriptor is stored
/// apart from the rest, so [`TaskCatalog::pick`] is total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCatalog {
    first: TaskDescriptor,
    rest: Vec<TaskDescriptor>,
}

impl TaskCatalog {
    /// Builds a catalogue from parsed descriptors.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Empty`] for an empty list and
    /// [`CatalogError::BlankTaskName`] when any descriptor has a blank name.
    pub fn new(descriptors: Vec<TaskDescriptor>) -> Result<Self, CatalogError> {
        if descriptors
            .iter()
            .any(|descriptor| descriptor.name().trim().is_empty())
        {
            return Err(CatalogError::BlankTaskName);
        }
        let mut remaining = descriptors.into_iter();
        let first = remaining.next().ok_or(CatalogError::Empty)?;
        Ok(Self {
            first,
            rest: remaining.collect(),
        })
    }

    /// Parses a catalogue from the on-disk JSON array shape.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] for malformed JSON, plus the
    /// [`TaskCatalog::new`] validation errors.
    pub fn from_json(data: &str) -> Result<Self, CatalogError> {
        let descriptors: Vec<TaskDescriptor> = serde_json::from_str(data)?;
        Self::new(descriptors)
    }

    /// Returns the number of descriptors; always at least one.
    #[must_use]
    pub const fn task_count(&self) -> usize {
        self.rest.len() + 1
    }

    /// Iterates over every descriptor in catalogue order.
    #[must_use]
    pub fn descriptors(&self) -> impl Iterator<Item = &TaskDescriptor> {
        std::iter::once(&self.first).chain(self.rest.iter())
    }

    /// Selects a uniformly random descriptor.
    #[must_use]
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &TaskDescriptor {
        let index = rng.random_range(0..self.task_count());
        index
            .checked_sub(1)
            .and_then(|rest_index| self.rest.get(rest_index))
            .unwrap_or(&self.first)
    }
}
