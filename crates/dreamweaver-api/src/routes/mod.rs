//! Route modules and the assembled application router.

use axum::Router;

use crate::state::AppState;

pub mod dreams;
mod generation;
pub mod health;
pub mod library;
pub mod play;
pub mod worlds;

/// Builds the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .nest("/api/v1/library", library::router())
        .nest("/api/v1/dreams", dreams::router())
        .nest("/api/v1/worlds", worlds::router())
        .nest("/api/v1/play", play::router())
        .with_state(state)
}
