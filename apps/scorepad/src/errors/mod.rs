//! Error handling for the scorepad engine.

pub mod domain;
pub mod error_code;

pub use domain::{DomainError, SequenceKind, ValidationKind};
pub use error_code::ErrorCode;
