use crate::domain::shared::ProviderError;
use crate::domain::speech::MAX_CHUNK_CHARS;
use async_trait::async_trait;

/// Repository for TTS synthesis operations.
/// Abstracts the underlying TTS provider (OpenAI, AWS Polly, etc.)
///
/// Implementations synthesize a single chunk with a fixed voice. Splitting long
/// text and merging the resulting audio is done by the speech service.
#[async_trait]
pub trait TtsRepository: Send + Sync {
    fn is_configured(&self) -> bool {
        true
    }

    /// Longest chunk, in characters, the provider accepts in one request
    fn max_chunk_chars(&self) -> usize {
        MAX_CHUNK_CHARS
    }

    /// Synthesize one chunk of text to speech
    ///
    /// Returns MP3 audio data for the chunk
    ///
    /// # Arguments
    /// * `text` - A chunk of at most [`Self::max_chunk_chars`] characters, ending on a sentence boundary where possible
    ///
    /// # Errors
    /// Returns a classified [`ProviderError`] if synthesis fails or the provider is unavailable
    async fn synthesize_chunk(&self, text: &str) -> Result<Vec<u8>, ProviderError>;
}
