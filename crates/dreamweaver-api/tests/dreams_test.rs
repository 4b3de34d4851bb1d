//! Integration tests for starting dreams and playing them.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use dreamweaver_dreams::application::generation::Generators;
use dreamweaver_dreams::application::reconciler::GENERATION_FAILED_MESSAGE;
use dreamweaver_test_support::{
    FailingImage, FailingNarrative, RecordingStorage, ScriptedNarrative, StaticImage,
    sample_scene,
};
use serde_json::json;

#[tokio::test]
async fn test_start_dream_then_choose_round_trip() {
    // Arrange
    let storage = Arc::new(RecordingStorage::new());
    let (app, _) = common::build_test_app(
        storage.clone(),
        common::scripted(vec![sample_scene(1), sample_scene(2)]),
    )
    .await;

    // Act: POST /api/v1/dreams
    let world_id = common::start_dream(app.clone(), "An orchard that grows clocks").await;

    // Act: POST /api/v1/play/choices
    let (status, json) =
        common::post_json(app.clone(), "/api/v1/play/choices", &json!({ "option": "Option 1b" }))
            .await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outcome"], "committed");
    assert_eq!(json["world_id"], world_id.as_str());
    assert_eq!(json["library"]["worlds"][0]["turn_count"], 2);
    assert_eq!(json["library"]["worlds"][0]["preview_text"], "Scene 2...");

    // GET /api/v1/worlds/{id}: verify state
    let (status, world) = common::get_json(app, &format!("/api/v1/worlds/{world_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(world["title"], "An orchard that grows clocks");
    assert_eq!(world["history"][0]["scene_description"], "Scene 1");
    assert_eq!(world["history"][0]["choice_taken"], "Option 1b");
    assert!(world["history"][0]["image_base64"].is_null());
    assert_eq!(world["current_turn"]["scene_description"], "Scene 2");
    assert_eq!(world["current_turn"]["image_base64"], "aW1hZ2U=");
    assert_eq!(
        world["current_turn"]["options"],
        json!(["Option 2a", "Option 2b"])
    );

    assert_eq!(storage.saved().len(), 2);
}

#[tokio::test]
async fn test_blank_seed_returns_400_without_generating() {
    let narrative = Arc::new(ScriptedNarrative::new(vec![sample_scene(1)]));
    let generators = Generators::new(narrative.clone(), Arc::new(StaticImage::none()));
    let (app, _) = common::build_test_app(Arc::new(RecordingStorage::new()), generators).await;

    let (status, json) =
        common::post_json(app, "/api/v1/dreams", &json!({ "seed_text": "\n  " })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");
    assert!(narrative.calls().is_empty());
}

#[tokio::test]
async fn test_start_dream_while_playing_returns_409() {
    let (app, _) = common::build_test_app(
        Arc::new(RecordingStorage::new()),
        common::scripted(vec![sample_scene(1), sample_scene(2)]),
    )
    .await;
    common::start_dream(app.clone(), "first").await;

    let (status, json) =
        common::post_json(app, "/api/v1/dreams", &json!({ "seed_text": "second" })).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["message"], "dreams.start_dream is not allowed while interactive");
}

#[tokio::test]
async fn test_narrative_failure_returns_502_and_leaves_no_world() {
    // Arrange
    let generators = Generators::new(Arc::new(FailingNarrative), Arc::new(StaticImage::none()));
    let (app, _) = common::build_test_app(Arc::new(RecordingStorage::new()), generators).await;

    // Act
    let (status, json) =
        common::post_json(app.clone(), "/api/v1/dreams", &json!({ "seed_text": "ash" })).await;

    // Assert
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["error"], "generation_failed");
    assert_eq!(json["message"], GENERATION_FAILED_MESSAGE);

    let (_, library) = common::get_json(app.clone(), "/api/v1/library").await;
    assert_eq!(library["phase"], "failed");
    assert_eq!(library["worlds"].as_array().unwrap().len(), 0);

    let (status, library) = common::post_empty(app, "/api/v1/library/return").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(library["phase"], "idle");
}

#[tokio::test]
async fn test_image_failure_on_choice_keeps_world_unchanged() {
    // Arrange
    let (app, state) = common::build_test_app(
        Arc::new(RecordingStorage::new()),
        common::scripted(vec![sample_scene(1)]),
    )
    .await;
    let world_id = common::start_dream(app.clone(), "paper moon").await;
    let mut swapped = state.clone();
    swapped.generators = Generators::new(
        Arc::new(ScriptedNarrative::new(vec![sample_scene(2)])),
        Arc::new(FailingImage),
    );
    let app = dreamweaver_api::routes::app(swapped);

    // Act
    let (status, _) =
        common::post_json(app.clone(), "/api/v1/play/choices", &json!({ "option": "Option 1a" }))
            .await;

    // Assert
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let (_, world) = common::get_json(app, &format!("/api/v1/worlds/{world_id}")).await;
    assert_eq!(world["history"].as_array().unwrap().len(), 0);
    assert_eq!(world["current_turn"]["scene_description"], "Scene 1");
}
