//! Test storage: mock `WorldStorage` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use dreamweaver_core::error::StorageError;
use dreamweaver_core::storage::WorldStorage;

/// A storage that records every `save` call. `load` returns the most recent
/// saved blob, or the initial blob if nothing has been saved yet.
#[derive(Debug, Default)]
pub struct RecordingStorage {
    initial: Option<String>,
    saved: Mutex<Vec<(String, String)>>,
}

impl RecordingStorage {
    /// Create an empty recording storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recording storage that already holds `blob`.
    #[must_use]
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            initial: Some(blob.into()),
            saved: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of all `(key, blob)` pairs saved so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn saved(&self) -> Vec<(String, String)> {
        self.saved.lock().unwrap().clone()
    }

    /// Returns the last saved blob, if any.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn last_saved(&self) -> Option<String> {
        self.saved.lock().unwrap().last().map(|(_, blob)| blob.clone())
    }
}

#[async_trait]
impl WorldStorage for RecordingStorage {
    async fn load(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.last_saved().or_else(|| self.initial.clone()))
    }

    async fn save(&self, key: &str, blob: &str) -> Result<(), StorageError> {
        self.saved
            .lock()
            .unwrap()
            .push((key.to_owned(), blob.to_owned()));
        Ok(())
    }
}

/// A storage whose writes always fail as if the quota were exhausted. Loads
/// return the blob it was created with, which no failed write ever changes.
#[derive(Debug, Default)]
pub struct FailingStorage {
    stored: Option<String>,
}

impl FailingStorage {
    /// Create a failing storage with nothing stored.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a failing storage that already holds `blob`.
    #[must_use]
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            stored: Some(blob.into()),
        }
    }
}

#[async_trait]
impl WorldStorage for FailingStorage {
    async fn load(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.stored.clone())
    }

    async fn save(&self, _key: &str, blob: &str) -> Result<(), StorageError> {
        Err(StorageError::CapacityExceeded {
            limit: 0,
            attempted: blob.len(),
        })
    }
}

/// A storage whose reads always fail. Writes succeed and are discarded.
#[derive(Debug)]
pub struct UnreadableStorage;

#[async_trait]
impl WorldStorage for UnreadableStorage {
    async fn load(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Io("permission denied".into()))
    }

    async fn save(&self, _key: &str, _blob: &str) -> Result<(), StorageError> {
        Ok(())
    }
}
