//! Identifiers for worlds and turns, and the port that mints them.
//!
//! Identifiers are opaque strings. Freshly minted ones are UUIDs, but saved
//! libraries may carry ids in any other format and must round-trip unchanged.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a world (save slot).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorldId(String);

impl WorldId {
    /// Wraps an existing identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as stored.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Uuid> for WorldId {
    fn from(id: Uuid) -> Self {
        Self(id.to_string())
    }
}

/// Identifier of a single turn within a world.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TurnId(String);

impl TurnId {
    /// Wraps an existing identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as stored.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Uuid> for TurnId {
    fn from(id: Uuid) -> Self {
        Self(id.to_string())
    }
}

/// Abstraction over identifier minting.
///
/// In production this is random; tests inject a sequence so that world and
/// turn identifiers are predictable.
pub trait IdGenerator: Send + Sync {
    /// Returns a fresh, never-before-returned identifier.
    fn next_id(&self) -> Uuid;

    /// Mints a world identifier.
    fn world_id(&self) -> WorldId {
        WorldId::from(self.next_id())
    }

    /// Mints a turn identifier.
    fn turn_id(&self) -> TurnId {
        TurnId::from(self.next_id())
    }
}

/// Production identifier source backed by random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}
