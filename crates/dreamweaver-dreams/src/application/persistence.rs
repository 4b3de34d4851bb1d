//! Loading and saving the world library through the storage port.

use std::sync::Arc;

use dreamweaver_core::error::StorageError;
use dreamweaver_core::storage::{WORLDS_STORAGE_KEY, WorldStorage};
use tracing::{debug, warn};

use crate::domain::library::WorldLibrary;

/// Serializes the whole library to JSON under [`WORLDS_STORAGE_KEY`].
#[derive(Clone)]
pub struct WorldPersistence {
    storage: Arc<dyn WorldStorage>,
}

impl WorldPersistence {
    /// Wraps a storage adapter.
    #[must_use]
    pub fn new(storage: Arc<dyn WorldStorage>) -> Self {
        Self { storage }
    }

    /// Reads the saved library.
    ///
    /// Nothing stored, an unreadable store, or an unparseable blob all yield
    /// an empty library; a first run looks exactly like this.
    pub async fn load(&self) -> WorldLibrary {
        let blob = match self.storage.load(WORLDS_STORAGE_KEY).await {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                debug!("no saved worlds");
                return WorldLibrary::new();
            }
            Err(error) => {
                warn!(%error, "failed to read saved worlds, starting empty");
                return WorldLibrary::new();
            }
        };

        match serde_json::from_str::<WorldLibrary>(&blob) {
            Ok(library) => {
                for world in library.worlds() {
                    if !world.holds_turn_invariant() {
                        warn!(world_id = %world.id(), "saved world has inconsistent turn history");
                    }
                }
                debug!(worlds = library.len(), "loaded saved worlds");
                library
            }
            Err(error) => {
                warn!(%error, "failed to parse saved worlds, starting empty");
                WorldLibrary::new()
            }
        }
    }

    /// Writes the full library.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the library cannot be encoded,
    /// or whatever error the storage adapter reports for the write.
    pub async fn save(&self, library: &WorldLibrary) -> Result<(), StorageError> {
        let blob = serde_json::to_string(library)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.storage.save(WORLDS_STORAGE_KEY, &blob).await
    }
}
