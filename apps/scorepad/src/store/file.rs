//! JSON file store guarded by an OS-level exclusive lock on `<path>.lock`.
//!
//! A store opened with [`FileStore::locked`] keeps the lock until it is
//! dropped, so a second process cannot load the game, play a round, and
//! overwrite this one's save. [`FileStore::new`] only locks around each call.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use fs4::fs_std::FileExt;
use serde_json::Value;
use tracing::debug;

use super::{GameStore, StoreError};
use crate::domain::snapshot::GameSnapshot;

pub struct FileStore {
    path: PathBuf,
    lock_path: PathBuf,
    held: Option<File>,
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let lock_path = with_suffix(&path, ".lock");
        Self {
            path,
            lock_path,
            held: None,
        }
    }

    /// Open the store and hold its lock until drop. Contention fails fast.
    pub fn locked(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let mut store = Self::new(path);
        store.held = Some(store.acquire()?);
        debug!(lock_path = %store.lock_path.display(), "Store lock held for session");
        Ok(store)
    }

    pub fn holds_lock(&self) -> bool {
        self.held.is_some()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lock_path(&self) -> &Path {
        &self.lock_path
    }

    fn acquire(&self) -> Result<File, StoreError> {
        if let Some(parent) = self.lock_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .truncate(true)
            .read(true)
            .write(true)
            .open(&self.lock_path)
            .map_err(|e| StoreError::io(&self.lock_path, e))?;

        // Ok(false) and WouldBlock both mean another handle holds the lock.
        match file.try_lock_exclusive() {
            Ok(true) => {}
            Ok(false) => return Err(self.contended()),
            Err(e) if e.kind() == ErrorKind::WouldBlock => return Err(self.contended()),
            Err(e) => return Err(StoreError::io(&self.lock_path, e)),
        }
        debug!(lock_path = %self.lock_path.display(), "Store lock acquired");
        Ok(file)
    }

    /// Run `f` under the exclusive lock, taking it just for the call unless already held.
    fn with_lock<T>(&self, f: impl FnOnce() -> Result<T, StoreError>) -> Result<T, StoreError> {
        if self.held.is_some() {
            return f();
        }
        let file = self.acquire()?;
        let result = f();
        release(&file, &self.lock_path);
        result
    }

    fn contended(&self) -> StoreError {
        debug!(lock_path = %self.lock_path.display(), "Store lock contended");
        StoreError::Locked {
            path: self.path.clone(),
        }
    }
}

fn release(file: &File, lock_path: &Path) {
    // Closing the handle releases the lock anyway.
    if let Err(e) = FileExt::unlock(file) {
        debug!(lock_path = %lock_path.display(), error = %e, "Store unlock failed");
    }
}

impl Drop for FileStore {
    fn drop(&mut self) {
        if let Some(file) = self.held.take() {
            release(&file, &self.lock_path);
        }
    }
}

impl GameStore for FileStore {
    fn load(&self) -> Result<Option<Value>, StoreError> {
        self.with_lock(|| {
            let text = match fs::read_to_string(&self.path) {
                Ok(text) => text,
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
                Err(e) => return Err(StoreError::io(&self.path, e)),
            };
            let value = serde_json::from_str(&text).map_err(|e| StoreError::Corrupt(e.to_string()))?;
            debug!(path = %self.path.display(), "Saved game loaded");
            Ok(Some(value))
        })
    }

    /// Write to `<path>.tmp` then rename, so a crash never leaves a half-written save.
    fn save(&self, snapshot: &GameSnapshot) -> Result<(), StoreError> {
        let text =
            serde_json::to_string_pretty(snapshot).map_err(|e| StoreError::Encode(e.to_string()))?;
        self.with_lock(|| {
            let tmp = with_suffix(&self.path, ".tmp");
            fs::write(&tmp, text.as_bytes()).map_err(|e| StoreError::io(&tmp, e))?;
            fs::rename(&tmp, &self.path).map_err(|e| StoreError::io(&self.path, e))?;
            debug!(
                path = %self.path.display(),
                current_round = snapshot.current_round,
                "Game saved"
            );
            Ok(())
        })
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.with_lock(|| match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "Saved game cleared");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(&self.path, e)),
        })
    }
}
