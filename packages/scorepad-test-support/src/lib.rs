//! Shared helpers for scorepad unit and integration tests.

pub mod logging;
