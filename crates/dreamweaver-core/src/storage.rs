//! Key-value storage port for the serialized world collection.

use async_trait::async_trait;

use crate::error::StorageError;

/// Fixed key under which the world collection is stored.
pub const WORLDS_STORAGE_KEY: &str = "dreamweaver_worlds";

/// Opaque get/set of a serialized blob.
#[async_trait]
pub trait WorldStorage: Send + Sync {
    /// Reads the blob stored under `key`. `Ok(None)` when nothing is stored.
    async fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the blob stored under `key`.
    async fn save(&self, key: &str, blob: &str) -> Result<(), StorageError>;
}
