//! Unit tests for the task catalogue.
