//! The recency-ordered world collection.

use dreamweaver_core::id::WorldId;
use serde::{Deserialize, Serialize};

use super::world::World;

/// All worlds, most recently created or played first.
///
/// This order is both the persisted order and the display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorldLibrary {
    worlds: Vec<World>,
}

impl WorldLibrary {
    /// Creates an empty library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Places `world` at the front, replacing any world with the same id.
    ///
    /// Calling this with a world that is already first still replaces it, and
    /// never leaves two entries with the same id.
    pub fn move_to_front(&mut self, world: World) {
        self.worlds.retain(|existing| existing.id() != world.id());
        self.worlds.insert(0, world);
    }

    /// Removes the world with `world_id`, returning it if present.
    pub fn remove(&mut self, world_id: &WorldId) -> Option<World> {
        let index = self.position(world_id)?;
        Some(self.worlds.remove(index))
    }

    /// Looks up a world by id.
    #[must_use]
    pub fn get(&self, world_id: &WorldId) -> Option<&World> {
        self.worlds.iter().find(|world| world.id() == world_id)
    }

    /// Whether a world with `world_id` exists.
    #[must_use]
    pub fn contains(&self, world_id: &WorldId) -> bool {
        self.get(world_id).is_some()
    }

    /// Index of the world with `world_id`, if present.
    #[must_use]
    pub fn position(&self, world_id: &WorldId) -> Option<usize> {
        self.worlds.iter().position(|world| world.id() == world_id)
    }

    /// Worlds in recency order.
    #[must_use]
    pub fn worlds(&self) -> &[World] {
        &self.worlds
    }

    /// Number of worlds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.worlds.len()
    }

    /// Whether the library is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.worlds.is_empty()
    }
}
