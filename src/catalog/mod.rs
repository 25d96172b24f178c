//! Task catalogue for the compliance game.
//!
//! The catalogue is an immutable, non-empty collection of task descriptors
//! loaded once at startup (typically from the `tasks.json` shipped alongside
//! the game) and consulted by the session whenever a new round is picked.

mod descriptor;
mod selection;

pub use descriptor::{TaskDescriptor, TaskKind};
pub use selection::{CatalogError, TaskCatalog};

#[cfg(test)]
mod tests;
