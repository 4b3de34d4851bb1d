//! Query handlers for the Dreams context.
//!
//! Read-only view DTOs built from the reconciler's in-memory state.

use chrono::{DateTime, Utc};
use dreamweaver_core::error::DomainError;
use dreamweaver_core::id::{TurnId, WorldId};
use serde::Serialize;

use crate::application::reconciler::Reconciler;
use crate::domain::session::Phase;
use crate::domain::turn::Turn;
use crate::domain::world::World;

/// Library listing entry.
#[derive(Debug, Serialize)]
pub struct WorldSummary {
    /// The world identifier.
    pub id: WorldId,
    /// Title derived from the seed.
    pub title: String,
    /// Snippet of the latest scene.
    pub preview_text: String,
    /// When the world was created.
    pub created_at: DateTime<Utc>,
    /// When a turn was last committed.
    pub last_played_at: DateTime<Utc>,
    /// Archived turns plus the active one.
    pub turn_count: usize,
}

/// The library screen: session status plus every world, most recent first.
#[derive(Debug, Serialize)]
pub struct LibraryView {
    /// Current session phase.
    pub phase: Phase,
    /// World in play, if any.
    pub active_world_id: Option<WorldId>,
    /// Set when the last write to storage failed.
    pub storage_warning: Option<String>,
    /// All worlds.
    pub worlds: Vec<WorldSummary>,
}

/// One turn as shown to the player.
#[derive(Debug, Serialize)]
pub struct TurnView {
    /// The turn identifier.
    pub id: TurnId,
    /// Narrative prose.
    pub scene_description: String,
    /// Base64 image, when one was generated and not yet archived.
    pub image_base64: Option<String>,
    /// Offered options.
    pub options: Vec<String>,
    /// The option taken; only set on archived turns.
    pub choice_taken: Option<String>,
}

/// Full view of a single world.
#[derive(Debug, Serialize)]
pub struct WorldView {
    /// The world identifier.
    pub id: WorldId,
    /// Title derived from the seed.
    pub title: String,
    /// When the world was created.
    pub created_at: DateTime<Utc>,
    /// When a turn was last committed.
    pub last_played_at: DateTime<Utc>,
    /// Archived turns, oldest first.
    pub history: Vec<TurnView>,
    /// The turn awaiting a choice.
    pub current_turn: Option<TurnView>,
    /// Snippet of the latest scene.
    pub preview_text: String,
}

impl From<&Turn> for TurnView {
    fn from(turn: &Turn) -> Self {
        Self {
            id: turn.id().clone(),
            scene_description: turn.scene_description().to_owned(),
            image_base64: turn.image().map(|image| image.as_base64().to_owned()),
            options: turn.options().to_vec(),
            choice_taken: turn.choice_taken().map(str::to_owned),
        }
    }
}

impl From<&World> for WorldView {
    fn from(world: &World) -> Self {
        Self {
            id: world.id().clone(),
            title: world.title().to_owned(),
            created_at: world.created_at(),
            last_played_at: world.last_played_at(),
            history: world.history().iter().map(TurnView::from).collect(),
            current_turn: world.current_turn().map(TurnView::from),
            preview_text: world.preview_text().to_owned(),
        }
    }
}

impl From<&World> for WorldSummary {
    fn from(world: &World) -> Self {
        Self {
            id: world.id().clone(),
            title: world.title().to_owned(),
            preview_text: world.preview_text().to_owned(),
            created_at: world.created_at(),
            last_played_at: world.last_played_at(),
            turn_count: world.turn_count(),
        }
    }
}

/// Builds the library view.
#[must_use]
pub fn get_library(reconciler: &Reconciler) -> LibraryView {
    let session = reconciler.session();
    LibraryView {
        phase: session.phase(),
        active_world_id: session.active_world().cloned(),
        storage_warning: session.storage_warning().map(str::to_owned),
        worlds: reconciler
            .library()
            .worlds()
            .iter()
            .map(WorldSummary::from)
            .collect(),
    }
}

/// Retrieves a world by its ID.
///
/// # Errors
///
/// Returns `DomainError::WorldNotFound` if no such world exists.
pub fn get_world_by_id(
    reconciler: &Reconciler,
    world_id: &WorldId,
) -> Result<WorldView, DomainError> {
    reconciler
        .library()
        .get(world_id)
        .map(WorldView::from)
        .ok_or_else(|| DomainError::WorldNotFound(world_id.clone()))
}

/// Retrieves the world in play, if any.
#[must_use]
pub fn get_active_world(reconciler: &Reconciler) -> Option<WorldView> {
    reconciler.active_world().map(WorldView::from)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use dreamweaver_core::error::DomainError;
    use dreamweaver_core::id::WorldId;
    use dreamweaver_test_support::{
        FixedClock, RecordingStorage, ScriptedNarrative, SequenceIds, StaticImage, sample_scene,
    };
    use uuid::Uuid;

    use super::*;
    use crate::application::generation::Generators;
    use crate::application::persistence::WorldPersistence;
    use crate::domain::commands::{Choose, StartDream};

    async fn reconciler_with_played_world() -> Reconciler {
        let mut reconciler = Reconciler::open(
            WorldPersistence::new(Arc::new(RecordingStorage::new())),
            Arc::new(FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())),
            Arc::new(SequenceIds::new()),
        )
        .await;
        let generators = Generators::new(
            Arc::new(ScriptedNarrative::new(vec![sample_scene(1), sample_scene(2)])),
            Arc::new(StaticImage::some("aW1n")),
        );
        reconciler
            .start_dream(
                &StartDream {
                    correlation_id: Uuid::new_v4(),
                    seed_text: "A library at the bottom of a well".to_owned(),
                },
                &generators,
            )
            .await
            .unwrap();
        reconciler
            .choose(
                &Choose {
                    correlation_id: Uuid::new_v4(),
                    option: "Option 1b".to_owned(),
                },
                &generators,
            )
            .await
            .unwrap();
        reconciler
    }

    #[tokio::test]
    async fn test_get_library_summarizes_worlds_and_session() {
        // Arrange
        let reconciler = reconciler_with_played_world().await;

        // Act
        let view = get_library(&reconciler);

        // Assert
        assert_eq!(view.phase, Phase::Interactive);
        assert_eq!(view.active_world_id, Some(WorldId::from(Uuid::from_u128(1))));
        assert!(view.storage_warning.is_none());
        assert_eq!(view.worlds.len(), 1);
        let summary = &view.worlds[0];
        assert_eq!(summary.title, "A library at the bottom of a well");
        assert_eq!(summary.preview_text, "Scene 2...");
        assert_eq!(summary.turn_count, 2);
    }

    #[tokio::test]
    async fn test_get_world_by_id_returns_history_and_current_turn() {
        // Arrange
        let reconciler = reconciler_with_played_world().await;

        // Act
        let view = get_world_by_id(&reconciler, &WorldId::from(Uuid::from_u128(1))).unwrap();

        // Assert
        assert_eq!(view.history.len(), 1);
        assert_eq!(view.history[0].choice_taken.as_deref(), Some("Option 1b"));
        assert!(view.history[0].image_base64.is_none());
        let current = view.current_turn.unwrap();
        assert_eq!(current.scene_description, "Scene 2");
        assert_eq!(current.image_base64.as_deref(), Some("aW1n"));
        assert_eq!(current.options, vec!["Option 2a", "Option 2b"]);
    }

    #[tokio::test]
    async fn test_get_world_by_id_returns_not_found_for_unknown_world() {
        let reconciler = reconciler_with_played_world().await;
        let missing = WorldId::from(Uuid::new_v4());

        let result = get_world_by_id(&reconciler, &missing);

        match result {
            Err(DomainError::WorldNotFound(id)) => assert_eq!(id, missing),
            other => panic!("expected WorldNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_active_world_matches_session() {
        let reconciler = reconciler_with_played_world().await;

        let view = get_active_world(&reconciler).unwrap();

        assert_eq!(view.id, WorldId::from(Uuid::from_u128(1)));
    }

    #[tokio::test]
    async fn test_library_view_serializes_phase_in_snake_case() {
        let reconciler = reconciler_with_played_world().await;

        let json = serde_json::to_value(get_library(&reconciler)).unwrap();

        assert_eq!(json["phase"], "interactive");
        assert_eq!(json["worlds"][0]["turn_count"], 2);
    }
}
