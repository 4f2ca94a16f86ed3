pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod services;
pub mod store;
pub mod telemetry;

// Re-exports for public API
pub use config::Config;
pub use error::AppError;
pub use errors::{DomainError, ErrorCode};
pub use services::game_flow::{GameFlow, SubmitOutcome};
pub use store::{FileStore, GameStore, MemoryStore, StoreError};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    scorepad_test_support::logging::init();
}
