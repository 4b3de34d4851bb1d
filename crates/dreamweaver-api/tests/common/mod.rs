//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use dreamweaver_core::clock::Clock;
use dreamweaver_core::generator::GeneratedScene;
use dreamweaver_core::storage::WorldStorage;
use dreamweaver_dreams::application::generation::Generators;
use dreamweaver_dreams::application::persistence::WorldPersistence;
use dreamweaver_dreams::application::reconciler::Reconciler;
use dreamweaver_test_support::{FixedClock, ScriptedNarrative, SequenceIds, StaticImage};
use http_body_util::BodyExt;
use tower::ServiceExt;

use dreamweaver_api::routes;
use dreamweaver_api::state::AppState;

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

/// Generators whose narrative yields `scenes` in order and whose images are
/// always present.
pub fn scripted(scenes: Vec<GeneratedScene>) -> Generators {
    Generators::new(
        Arc::new(ScriptedNarrative::new(scenes)),
        Arc::new(StaticImage::some("aW1hZ2U=")),
    )
}

/// Build the full app over `storage` and `generators`, with deterministic
/// clock and IDs. Returns the state too so tests can inspect it.
pub async fn build_test_app(
    storage: Arc<dyn WorldStorage>,
    generators: Generators,
) -> (Router, AppState) {
    let reconciler = Reconciler::open(
        WorldPersistence::new(storage),
        fixed_clock(),
        Arc::new(SequenceIds::new()),
    )
    .await;
    let state = AppState::new(reconciler, generators);
    (routes::app(state.clone()), state)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = if body_bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap()
    };

    (status, json)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a POST request without a body and return the response.
pub async fn post_empty(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Send a DELETE request and return the response.
pub async fn delete_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}

/// Start a dream and return the new world's ID.
pub async fn start_dream(app: Router, seed_text: &str) -> String {
    let (status, json) = post_json(
        app,
        "/api/v1/dreams",
        &serde_json::json!({ "seed_text": seed_text }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "start_dream failed: {json}");
    json["world_id"].as_str().unwrap().to_owned()
}
