//! Shared helpers for integration tests.

pub mod slow_reader;
