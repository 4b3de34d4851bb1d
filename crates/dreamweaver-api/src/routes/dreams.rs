//! Routes for starting new dreams.

use axum::extract::State;
use axum::{Json, Router, routing::post};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use dreamweaver_dreams::domain::commands;

use crate::error::ApiError;
use crate::routes::generation::{GenerationResponse, run_and_resolve};
use crate::state::AppState;

/// Request body for POST /.
#[derive(Debug, Deserialize)]
pub struct StartDreamRequest {
    /// Free text describing the setting, character or moment.
    pub seed_text: String,
}

/// POST /
#[instrument(skip(state, request))]
async fn start_dream(
    State(state): State<AppState>,
    Json(request): Json<StartDreamRequest>,
) -> Result<Json<GenerationResponse>, ApiError> {
    let command = commands::StartDream {
        correlation_id: Uuid::new_v4(),
        seed_text: request.seed_text,
    };

    info!(correlation_id = %command.correlation_id, "handling start_dream command");

    let pending = state.reconciler.lock().await.begin_start_dream(&command)?;
    run_and_resolve(&state, pending).await
}

/// Returns the router for starting dreams.
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(start_dream))
}
