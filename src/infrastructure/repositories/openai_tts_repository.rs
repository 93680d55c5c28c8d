use super::openai_error::classify_openai_error;
use super::tts_repository::TtsRepository;
use crate::domain::shared::ProviderError;
use async_openai::{
    config::OpenAIConfig,
    types::{CreateSpeechRequest, SpeechModel, Voice},
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;

/// OpenAI TTS implementation of TTS repository
pub struct OpenAiTtsRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
    voice: String,
}

impl OpenAiTtsRepository {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String, voice: String) -> Self {
        Self {
            client,
            model,
            voice,
        }
    }

    fn speech_model(&self) -> SpeechModel {
        match self.model.as_str() {
            "tts-1" => SpeechModel::Tts1,
            "tts-1-hd" => SpeechModel::Tts1Hd,
            other => SpeechModel::Other(other.to_string()),
        }
    }

    fn speech_voice(&self) -> Voice {
        match self.voice.to_lowercase().as_str() {
            "alloy" => Voice::Alloy,
            "echo" => Voice::Echo,
            "fable" => Voice::Fable,
            "onyx" => Voice::Onyx,
            "nova" => Voice::Nova,
            "shimmer" => Voice::Shimmer,
            _ => Voice::Alloy,
        }
    }
}

#[async_trait]
impl TtsRepository for OpenAiTtsRepository {
    async fn synthesize_chunk(&self, text: &str) -> Result<Vec<u8>, ProviderError> {
        tracing::info!(
            model = %self.model,
            voice = %self.voice,
            text_length = text.len(),
            text_preview = %text.chars().take(200).collect::<String>(),
            "Calling OpenAI TTS API"
        );

        let request = CreateSpeechRequest {
            model: self.speech_model(),
            input: text.to_string(),
            voice: self.speech_voice(),
            response_format: None, // Defaults to MP3
            speed: None,
        };

        let response = self.client.audio().speech(request).await.map_err(|e| {
            tracing::error!(
                error = %e,
                model = %self.model,
                voice = %self.voice,
                text_length = text.len(),
                "OpenAI TTS API call failed"
            );
            classify_openai_error(e)
        })?;

        let audio_bytes = response.bytes.to_vec();
        tracing::debug!(
            audio_size = audio_bytes.len(),
            "OpenAI TTS audio received successfully"
        );

        Ok(audio_bytes)
    }
}
