use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

/// Which providers were configured at startup
#[derive(Debug, Clone, Copy)]
pub struct Readiness {
    pub story_provider: bool,
    pub speech_provider: bool,
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn health_ready(State(readiness): State<Arc<Readiness>>) -> impl IntoResponse {
    let status = |configured: bool| if configured { "configured" } else { "not_configured" };

    let body = Json(json!({
        "status": if readiness.story_provider { "ready" } else { "not_ready" },
        "story": status(readiness.story_provider),
        "speech": status(readiness.speech_provider),
    }));

    if readiness.story_provider {
        (StatusCode::OK, body)
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, body)
    }
}
