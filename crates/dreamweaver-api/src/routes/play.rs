//! Routes for playing the active world.

use axum::extract::State;
use axum::{Json, Router, routing::post};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use dreamweaver_dreams::domain::commands;

use crate::error::ApiError;
use crate::routes::generation::{GenerationResponse, run_and_resolve};
use crate::state::AppState;

/// Request body for POST /choices.
#[derive(Debug, Deserialize)]
pub struct ChooseRequest {
    /// The option taken, as offered by the active turn.
    pub option: String,
}

/// POST /choices
#[instrument(skip(state, request))]
async fn choose(
    State(state): State<AppState>,
    Json(request): Json<ChooseRequest>,
) -> Result<Json<GenerationResponse>, ApiError> {
    let command = commands::Choose {
        correlation_id: Uuid::new_v4(),
        option: request.option,
    };

    info!(correlation_id = %command.correlation_id, "handling choose command");

    let pending = state.reconciler.lock().await.begin_choose(&command)?;
    run_and_resolve(&state, pending).await
}

/// Returns the router for play.
pub fn router() -> Router<AppState> {
    Router::new().route("/choices", post(choose))
}
