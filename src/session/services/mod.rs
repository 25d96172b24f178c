//! Application services orchestrating the round lifecycle.

mod round;

pub use round::{Collaborators, SessionTiming, TaskSession};
