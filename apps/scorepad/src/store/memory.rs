//! In-process store for tests and throwaway sessions.

use parking_lot::Mutex;
use serde_json::Value;

use super::{GameStore, StoreError};
use crate::domain::snapshot::GameSnapshot;

#[derive(Default)]
pub struct MemoryStore {
    slot: Mutex<Option<Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeded with a raw blob, as if a previous session had saved it.
    pub fn with_value(value: Value) -> Self {
        Self {
            slot: Mutex::new(Some(value)),
        }
    }

    /// Copy of what is currently saved.
    pub fn saved(&self) -> Option<Value> {
        self.slot.lock().clone()
    }
}

impl GameStore for MemoryStore {
    fn load(&self) -> Result<Option<Value>, StoreError> {
        Ok(self.slot.lock().clone())
    }

    fn save(&self, snapshot: &GameSnapshot) -> Result<(), StoreError> {
        let value = serde_json::to_value(snapshot).map_err(|e| StoreError::Encode(e.to_string()))?;
        *self.slot.lock() = Some(value);
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.slot.lock().take();
        Ok(())
    }
}
