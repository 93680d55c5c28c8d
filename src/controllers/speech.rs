use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::speech::{AudioAsset, SpeechRequest, SpeechService, SpeechServiceApi},
    error::{AppError, AppResult},
    infrastructure::repositories::AudioRepository,
};

/// Longest text accepted for a single synthesis request
const MAX_TEXT_CHARS: usize = 20_000;

pub struct SpeechController {
    speech_service: Arc<SpeechService>,
    audio_repo: Arc<AudioRepository>,
}

impl SpeechController {
    pub fn new(speech_service: Arc<SpeechService>, audio_repo: Arc<AudioRepository>) -> Self {
        Self {
            speech_service,
            audio_repo,
        }
    }

    /// POST /api/speech/synthesize - Narrate a story as one MP3 asset
    pub async fn synthesize(
        State(controller): State<Arc<SpeechController>>,
        Json(request): Json<SpeechRequest>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        if request.text.trim().is_empty() {
            return Err(AppError::BadRequest("Text cannot be empty".to_string()));
        }

        if request.text.chars().count() > MAX_TEXT_CHARS {
            return Err(AppError::PayloadTooLarge(
                "Text must be 20,000 characters or less".to_string(),
            ));
        }

        let asset = controller.speech_service.synthesize(&request.text).await?;

        let headers = audio_headers(&asset)?;
        let body = Body::from(asset.audio_data.clone());
        controller.audio_repo.insert(asset).await;

        Ok((StatusCode::OK, headers, body))
    }

    /// GET /api/audio/:audio_id - Fetch a previously synthesized asset
    pub async fn get_audio(
        State(controller): State<Arc<SpeechController>>,
        Path(audio_id): Path<Uuid>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let asset = controller
            .audio_repo
            .get(audio_id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("audio {}", audio_id)))?;

        let headers = audio_headers(&asset)?;
        Ok((StatusCode::OK, headers, Body::from(asset.audio_data)))
    }
}

fn audio_headers(asset: &AudioAsset) -> AppResult<HeaderMap> {
    let value = |v: String| {
        HeaderValue::from_str(&v).map_err(|e| AppError::Internal(format!("Invalid header: {}", e)))
    };

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(asset.content_type));
    headers.insert("X-Audio-Id", value(asset.id.to_string())?);
    headers.insert("X-Chunk-Count", value(asset.chunk_count.to_string())?);
    headers.insert(header::LOCATION, value(asset.location())?);
    Ok(headers)
}
