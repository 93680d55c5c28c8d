use super::chunker::split_into_chunks;
use super::AudioAsset;
use crate::domain::shared::{with_retry, ProviderOperation, RetryPolicy, StoryError};
use crate::infrastructure::repositories::TtsRepository;
use async_trait::async_trait;
use futures::future::try_join_all;
use std::sync::Arc;

pub struct SpeechService {
    tts_repo: Arc<dyn TtsRepository>,
    retry_policy: RetryPolicy,
}

impl SpeechService {
    pub fn new(tts_repo: Arc<dyn TtsRepository>, retry_policy: RetryPolicy) -> Self {
        Self {
            tts_repo,
            retry_policy,
        }
    }
}

#[async_trait]
pub trait SpeechServiceApi: Send + Sync {
    /// Narrate `text` as a single audio asset
    ///
    /// This operation:
    /// - Splits the text on sentence boundaries into chunks no longer than the provider accepts
    /// - Synthesizes all chunks concurrently, each under the retry policy
    /// - Concatenates the audio in chunk order
    ///
    /// Any chunk failure fails the whole operation; no partial audio is returned.
    async fn synthesize(&self, text: &str) -> Result<AudioAsset, StoryError>;
}

#[async_trait]
impl SpeechServiceApi for SpeechService {
    async fn synthesize(&self, text: &str) -> Result<AudioAsset, StoryError> {
        let start_time = std::time::Instant::now();

        if !self.tts_repo.is_configured() {
            return Err(StoryError::Configuration(
                "Speech provider is not configured. Please check your API key.".to_string(),
            ));
        }

        let chunks = split_into_chunks(text, self.tts_repo.max_chunk_chars());
        if chunks.is_empty() {
            return Err(StoryError::Validation("Text cannot be empty".to_string()));
        }

        tracing::info!(
            chunk_count = chunks.len(),
            text_length = text.len(),
            max_chunk_chars = self.tts_repo.max_chunk_chars(),
            "Text split into chunks"
        );

        // try_join_all yields results in input order, whatever order they complete in
        let audio_chunks = try_join_all(
            chunks
                .iter()
                .enumerate()
                .map(|(index, chunk)| self.synthesize_chunk(index, chunk)),
        )
        .await
        .map_err(|e| StoryError::from_provider(e, ProviderOperation::Speech))?;

        let audio_data = audio_chunks.concat();
        let asset = AudioAsset::new(chunks.len(), audio_data);

        tracing::info!(
            audio_id = %asset.id,
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = text.len(),
            chunk_count = asset.chunk_count,
            audio_size_bytes = asset.audio_data.len(),
            "Speech synthesis completed"
        );

        Ok(asset)
    }
}

impl SpeechService {
    async fn synthesize_chunk(
        &self,
        index: usize,
        chunk: &str,
    ) -> Result<Vec<u8>, crate::domain::shared::ProviderError> {
        tracing::debug!(chunk_index = index, chunk_size = chunk.len(), "Synthesizing chunk");

        let audio = with_retry(&self.retry_policy, "speech_synthesis", || {
            self.tts_repo.synthesize_chunk(chunk)
        })
        .await?;

        tracing::debug!(
            chunk_index = index,
            audio_size = audio.len(),
            "Chunk synthesized"
        );
        Ok(audio)
    }
}
