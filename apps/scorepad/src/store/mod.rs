//! Persistence collaborator for the single saved game.

pub mod file;
pub mod memory;

use std::io;
use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;

use crate::domain::snapshot::GameSnapshot;

pub use file::FileStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{path} is locked by another scorepad process")]
    Locked { path: PathBuf },
    #[error("saved game is not valid JSON: {0}")]
    Corrupt(String),
    #[error("failed to encode snapshot: {0}")]
    Encode(String),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Holds at most one saved game.
///
/// `load` hands back the raw blob; shape checks belong to `snapshot::deserialize`.
pub trait GameStore {
    fn load(&self) -> Result<Option<Value>, StoreError>;
    fn save(&self, snapshot: &GameSnapshot) -> Result<(), StoreError>;
    fn clear(&self) -> Result<(), StoreError>;
}

impl<S: GameStore + ?Sized> GameStore for &S {
    fn load(&self) -> Result<Option<Value>, StoreError> {
        (**self).load()
    }

    fn save(&self, snapshot: &GameSnapshot) -> Result<(), StoreError> {
        (**self).save(snapshot)
    }

    fn clear(&self) -> Result<(), StoreError> {
        (**self).clear()
    }
}
