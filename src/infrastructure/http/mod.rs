use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::infrastructure::config::Config;
use crate::{
    controllers::{
        catalog,
        health::{self, Readiness},
        speech::SpeechController,
        story::StoryController,
    },
    infrastructure::auth::{auth_middleware, request_id_middleware},
};

/// Build the application router with all routes configured
pub fn build_router(
    config: Arc<Config>,
    readiness: Arc<Readiness>,
    story_controller: Arc<StoryController>,
    speech_controller: Arc<SpeechController>,
) -> Router {
    // Story routes
    let story_routes = Router::new()
        .route("/api/stories/generate", post(StoryController::generate))
        .with_state(story_controller);

    // Speech routes
    let speech_routes = Router::new()
        .route("/api/speech/synthesize", post(SpeechController::synthesize))
        .route("/api/audio/:audio_id", get(SpeechController::get_audio))
        .with_state(speech_controller);

    // API routes (behind the bearer-token gate)
    let api_routes = Router::new()
        .route("/api/catalog", get(catalog::get_catalog))
        .merge(story_routes)
        .merge(speech_routes)
        .layer(middleware::from_fn_with_state(config, auth_middleware));

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(readiness)
        .merge(api_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    readiness: Arc<Readiness>,
    story_controller: Arc<StoryController>,
    speech_controller: Arc<SpeechController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(
        config.clone(),
        readiness,
        story_controller,
        speech_controller,
    );

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
