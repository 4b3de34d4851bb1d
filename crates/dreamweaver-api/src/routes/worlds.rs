//! Routes for individual saved worlds.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::{info, instrument};
use uuid::Uuid;

use dreamweaver_core::id::WorldId;
use dreamweaver_dreams::application::query_handlers::{self, LibraryView, WorldView};
use dreamweaver_dreams::domain::commands;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /{id}
async fn get_world(
    State(state): State<AppState>,
    Path(world_id): Path<String>,
) -> Result<Json<WorldView>, ApiError> {
    let reconciler = state.reconciler.lock().await;
    let view = query_handlers::get_world_by_id(&reconciler, &WorldId::new(world_id))?;
    Ok(Json(view))
}

/// POST /{id}/load
#[instrument(skip_all, fields(world_id = %world_id))]
async fn load_world(
    State(state): State<AppState>,
    Path(world_id): Path<String>,
) -> Result<Json<WorldView>, ApiError> {
    let command = commands::LoadWorld {
        correlation_id: Uuid::new_v4(),
        world_id: WorldId::new(world_id),
    };

    info!(correlation_id = %command.correlation_id, "handling load_world command");

    let mut reconciler = state.reconciler.lock().await;
    reconciler.load_world(&command)?;
    let view = query_handlers::get_world_by_id(&reconciler, &command.world_id)?;
    Ok(Json(view))
}

/// DELETE /{id}
#[instrument(skip_all, fields(world_id = %world_id))]
async fn delete_world(
    State(state): State<AppState>,
    Path(world_id): Path<String>,
) -> Result<Json<LibraryView>, ApiError> {
    let command = commands::DeleteWorld {
        correlation_id: Uuid::new_v4(),
        world_id: WorldId::new(world_id),
    };

    info!(correlation_id = %command.correlation_id, "handling delete_world command");

    let mut reconciler = state.reconciler.lock().await;
    reconciler.delete_world(&command).await?;
    Ok(Json(query_handlers::get_library(&reconciler)))
}

/// Returns the router for saved worlds.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(get_world).delete(delete_world))
        .route("/{id}/load", post(load_world))
}
