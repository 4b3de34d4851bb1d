//! Routes for the world library and session status.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::{info, instrument};
use uuid::Uuid;

use dreamweaver_dreams::application::query_handlers::{self, LibraryView};
use dreamweaver_dreams::domain::commands;

use crate::state::AppState;

/// GET /
async fn get_library(State(state): State<AppState>) -> Json<LibraryView> {
    let reconciler = state.reconciler.lock().await;
    Json(query_handlers::get_library(&reconciler))
}

/// POST /return
#[instrument(skip(state))]
async fn return_to_library(State(state): State<AppState>) -> Json<LibraryView> {
    let command = commands::ReturnToLibrary {
        correlation_id: Uuid::new_v4(),
    };

    info!(correlation_id = %command.correlation_id, "handling return_to_library command");

    let mut reconciler = state.reconciler.lock().await;
    reconciler.return_to_library(&command);
    Json(query_handlers::get_library(&reconciler))
}

/// POST /dismiss-warning
async fn dismiss_warning(State(state): State<AppState>) -> Json<LibraryView> {
    let mut reconciler = state.reconciler.lock().await;
    reconciler.dismiss_storage_warning();
    Json(query_handlers::get_library(&reconciler))
}

/// Returns the router for the library.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_library))
        .route("/return", post(return_to_library))
        .route("/dismiss-warning", post(dismiss_warning))
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::routes::testing::app_state;

    #[tokio::test]
    async fn test_get_library_on_first_run_is_empty_and_idle() {
        // Arrange
        let app = router().with_state(app_state(0).await);
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();

        // Act
        let response = app.oneshot(request).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(json["phase"], "idle");
        assert!(json["active_world_id"].is_null());
        assert!(json["storage_warning"].is_null());
        assert_eq!(json["worlds"].as_array().unwrap().len(), 0);
    }
}
