use thiserror::Error;

use crate::domain::snapshot::InvalidSnapshot;
use crate::errors::{DomainError, ErrorCode};
use crate::store::StoreError;

/// Application-boundary error for the front-end. Engine calls return `DomainError`.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Invalid snapshot: {0}")]
    Snapshot(#[from] InvalidSnapshot),
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Domain(e) => e.code(),
            AppError::Snapshot(_) => ErrorCode::InvalidSnapshot,
            AppError::Store(StoreError::Locked { .. }) => ErrorCode::StoreLocked,
            AppError::Store(_) => ErrorCode::StoreFailure,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }
}
