//! Unit tests for the round lifecycle state machine.
#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

mod helpers;

mod handle_tests;
mod verify_tests;
