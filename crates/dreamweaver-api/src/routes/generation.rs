//! Running a begun generation outside the reconciler lock.

use axum::Json;
use dreamweaver_core::error::DomainError;
use dreamweaver_core::id::WorldId;
use dreamweaver_dreams::application::generation::PendingGeneration;
use dreamweaver_dreams::application::query_handlers::{self, LibraryView};
use dreamweaver_dreams::application::reconciler::Resolution;
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

/// How a generating intent ended, from the client's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationOutcome {
    /// The result was merged into a world.
    Committed,
    /// A later intent superseded this one; nothing changed.
    Discarded,
}

/// Response body for generating intents.
#[derive(Debug, Serialize)]
pub struct GenerationResponse {
    /// Whether the result was applied.
    pub outcome: GenerationOutcome,
    /// The world that was created or advanced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub world_id: Option<WorldId>,
    /// The library after resolution.
    pub library: LibraryView,
}

/// Runs the generators without holding the lock, then resolves under it.
pub(crate) async fn run_and_resolve(
    state: &AppState,
    pending: PendingGeneration,
) -> Result<Json<GenerationResponse>, ApiError> {
    let outcome = state.generators.run(&pending).await;

    let mut reconciler = state.reconciler.lock().await;
    let resolution = reconciler.resolve(pending, outcome).await;
    let library = query_handlers::get_library(&reconciler);

    let (outcome, world_id) = match resolution {
        Resolution::Committed(world_id) => (GenerationOutcome::Committed, Some(world_id)),
        Resolution::Discarded => (GenerationOutcome::Discarded, None),
        Resolution::Failed(error) => return Err(ApiError(DomainError::Generation(error))),
    };

    Ok(Json(GenerationResponse {
        outcome,
        world_id,
        library,
    }))
}
