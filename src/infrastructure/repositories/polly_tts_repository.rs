use super::tts_repository::TtsRepository;
use crate::domain::shared::ProviderError;
use async_trait::async_trait;
use aws_sdk_polly::{
    config::http::HttpResponse,
    error::{DisplayErrorContext, ProvideErrorMetadata, SdkError},
    operation::synthesize_speech::SynthesizeSpeechError,
    types::{Engine, OutputFormat, VoiceId},
    Client as PollyClient,
};
use std::sync::Arc;

/// AWS Polly has a limit of 3000 characters per request
const POLLY_MAX_CHARS: usize = 3000;

/// AWS Polly implementation of TTS repository, using one fixed neural voice
pub struct PollyTtsRepository {
    polly_client: Arc<PollyClient>,
    voice: String,
}

impl PollyTtsRepository {
    pub fn new(polly_client: Arc<PollyClient>, voice: String) -> Self {
        Self {
            polly_client,
            voice,
        }
    }
}

fn classify_polly_error(err: SdkError<SynthesizeSpeechError, HttpResponse>) -> ProviderError {
    let message = DisplayErrorContext(&err).to_string();
    match &err {
        SdkError::TimeoutError(_) => ProviderError::Timeout(message),
        SdkError::DispatchFailure(failure) if failure.is_timeout() => {
            ProviderError::Timeout(message)
        }
        SdkError::DispatchFailure(_) => ProviderError::Network(message),
        _ => {
            let throttled = err
                .as_service_error()
                .and_then(|service| service.code())
                .map(|code| code.contains("Throttling"))
                .unwrap_or(false);
            if throttled {
                return ProviderError::RateLimited(message);
            }
            match err.raw_response().map(|response| response.status().as_u16()) {
                Some(status) => ProviderError::from_status(status, message),
                None => ProviderError::Other(message).normalized(),
            }
        }
    }
}

#[async_trait]
impl TtsRepository for PollyTtsRepository {
    fn max_chunk_chars(&self) -> usize {
        POLLY_MAX_CHARS
    }

    async fn synthesize_chunk(&self, text: &str) -> Result<Vec<u8>, ProviderError> {
        let voice_id = VoiceId::from(self.voice.as_str());
        let engine = Engine::Neural;

        tracing::info!(
            voice = %self.voice,
            engine = ?engine,
            output_format = "Mp3",
            text_length = text.len(),
            text_preview = %text.chars().take(200).collect::<String>(),
            "Calling AWS Polly synthesize_speech"
        );

        let result = self
            .polly_client
            .synthesize_speech()
            .text(text)
            .voice_id(voice_id)
            .output_format(OutputFormat::Mp3)
            .engine(engine)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %DisplayErrorContext(&e),
                    voice = %self.voice,
                    text_length = text.len(),
                    "AWS Polly synthesize_speech failed"
                );
                classify_polly_error(e)
            })?;

        tracing::debug!("AWS Polly synthesize_speech successful, reading audio stream");

        let audio_stream = result.audio_stream.collect().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to collect audio stream from Polly response");
            ProviderError::Network(format!("Failed to read audio stream: {}", e))
        })?;

        let audio_bytes = audio_stream.into_bytes().to_vec();
        tracing::debug!(
            audio_size = audio_bytes.len(),
            "Audio stream collected successfully"
        );

        Ok(audio_bytes)
    }
}
