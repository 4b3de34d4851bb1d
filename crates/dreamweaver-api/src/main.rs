//! DreamWeaver API server entry point.

use std::error::Error;
use std::sync::Arc;

use dreamweaver_core::clock::SystemClock;
use dreamweaver_core::id::RandomIds;
use dreamweaver_dreams::application::generation::Generators;
use dreamweaver_dreams::application::persistence::WorldPersistence;
use dreamweaver_dreams::application::reconciler::Reconciler;
use dreamweaver_gemini::GeminiClient;
use dreamweaver_store::FileWorldStorage;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use dreamweaver_api::config::AppConfig;
use dreamweaver_api::routes;
use dreamweaver_api::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting DreamWeaver API server");

    let config = AppConfig::from_env()?;

    // Storage and generators.
    let storage = Arc::new(FileWorldStorage::new(&config.data_dir));
    let gemini = Arc::new(
        GeminiClient::new(config.gemini_api_key.clone())
            .with_text_model(config.text_model.clone())
            .with_image_model(config.image_model.clone()),
    );
    let generators = Generators::new(gemini.clone(), gemini);

    let reconciler = Reconciler::open(
        WorldPersistence::new(storage),
        Arc::new(SystemClock),
        Arc::new(RandomIds),
    )
    .await;
    let app_state = AppState::new(reconciler, generators);

    // TODO: Replace CorsLayer::permissive() with the deployed frontend origin.
    let app = routes::app(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.socket_addr()?;
    tracing::info!(
        %addr,
        data_dir = %config.data_dir.display(),
        text_model = %config.text_model,
        image_model = %config.image_model,
        "Listening"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
