pub mod chunker;
pub mod service;

pub use chunker::{split_into_chunks, MAX_CHUNK_CHARS};
pub use service::{SpeechService, SpeechServiceApi};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const AUDIO_CONTENT_TYPE: &str = "audio/mpeg";

/// Narration of a whole story: per-chunk audio concatenated in chunk order,
/// addressable by `id`
#[derive(Debug, Clone)]
pub struct AudioAsset {
    pub id: Uuid,
    pub content_type: &'static str,
    pub chunk_count: usize,
    pub audio_data: Vec<u8>,
}

impl AudioAsset {
    pub fn new(chunk_count: usize, audio_data: Vec<u8>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content_type: AUDIO_CONTENT_TYPE,
            chunk_count,
            audio_data,
        }
    }

    /// Path the asset can be fetched from while it is cached
    pub fn location(&self) -> String {
        format!("/api/audio/{}", self.id)
    }
}

/// Request for POST /api/speech/synthesize
#[derive(Debug, Serialize, Deserialize)]
pub struct SpeechRequest {
    pub text: String,
}
