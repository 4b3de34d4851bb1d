//! In-memory implementation of the `WorldStorage` trait, with an optional
//! byte quota.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use dreamweaver_core::error::StorageError;
use dreamweaver_core::storage::WorldStorage;

/// Process-local storage. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryWorldStorage {
    blobs: Mutex<HashMap<String, String>>,
    capacity: Option<usize>,
}

impl MemoryWorldStorage {
    /// Creates an unbounded storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage that rejects writes once the total size of all
    /// stored blobs would exceed `bytes`.
    #[must_use]
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            blobs: Mutex::default(),
            capacity: Some(bytes),
        }
    }
}

#[async_trait]
impl WorldStorage for MemoryWorldStorage {
    async fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.blobs.lock().await.get(key).cloned())
    }

    async fn save(&self, key: &str, blob: &str) -> Result<(), StorageError> {
        let mut blobs = self.blobs.lock().await;
        if let Some(limit) = self.capacity {
            let others: usize = blobs
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(_, v)| v.len())
                .sum();
            let attempted = others + blob.len();
            if attempted > limit {
                debug!(key, attempted, limit, "write rejected by quota");
                return Err(StorageError::CapacityExceeded { limit, attempted });
            }
        }
        blobs.insert(key.to_owned(), blob.to_owned());
        Ok(())
    }
}
