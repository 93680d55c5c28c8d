use async_trait::async_trait;
use aws_sdk_polly::Client as PollyClient;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use storytime_backend::domain::shared::ProviderError;
use storytime_backend::infrastructure::repositories::{
    CompletionRepository, ImageRepository, TtsRepository,
};

use super::fixtures;

/// Completion provider that replays queued results, then falls back to a
/// well-formed 650 word story
pub struct ScriptedCompletion {
    responses: Mutex<VecDeque<Result<Option<String>, ProviderError>>>,
    calls: AtomicUsize,
    last_user_prompt: Mutex<Option<String>>,
}

impl ScriptedCompletion {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
            last_user_prompt: Mutex::new(None),
        }
    }

    pub fn push(&self, response: Result<Option<String>, ProviderError>) {
        self.responses.lock().push_back(response);
    }

    pub fn push_text(&self, text: &str) {
        self.push(Ok(Some(text.to_string())));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_user_prompt(&self) -> Option<String> {
        self.last_user_prompt.lock().clone()
    }
}

#[async_trait]
impl CompletionRepository for ScriptedCompletion {
    async fn complete(&self, _system: &str, user: &str) -> Result<Option<String>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_user_prompt.lock() = Some(user.to_string());

        self.responses
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(Some(fixtures::story_completion("The Glowing Acorn", 650))))
    }
}

/// Image provider returning a fixed URL, or none once cleared
pub struct ScriptedImage {
    url: Mutex<Option<String>>,
    calls: AtomicUsize,
}

impl ScriptedImage {
    pub fn new() -> Self {
        Self {
            url: Mutex::new(Some(fixtures::ICON_URL.to_string())),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn clear_url(&self) {
        *self.url.lock() = None;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageRepository for ScriptedImage {
    async fn generate_image(&self, _prompt: &str) -> Result<Option<String>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.url.lock().clone())
    }
}

/// Speech provider whose "audio" for a chunk is the chunk text itself
pub struct EchoTts {
    calls: AtomicUsize,
    failure: Mutex<Option<ProviderError>>,
}

impl EchoTts {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            failure: Mutex::new(None),
        }
    }

    pub fn fail_with(&self, err: ProviderError) {
        *self.failure.lock() = Some(err);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TtsRepository for EchoTts {
    async fn synthesize_chunk(&self, text: &str) -> Result<Vec<u8>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(err) = self.failure.lock().clone() {
            return Err(err);
        }

        Ok(text.as_bytes().to_vec())
    }
}

/// Polly client pointed at an endpoint nothing listens on
pub fn create_mock_polly_client() -> PollyClient {
    let config = aws_sdk_polly::Config::builder()
        .behavior_version(aws_sdk_polly::config::BehaviorVersion::latest())
        .region(aws_sdk_polly::config::Region::new("us-east-1"))
        .credentials_provider(aws_sdk_polly::config::Credentials::new(
            "test", "test", None, None, "test",
        ))
        .retry_config(aws_sdk_polly::config::retry::RetryConfig::disabled())
        .endpoint_url("http://127.0.0.1:9") // Non-existent endpoint for testing
        .build();

    PollyClient::from_conf(config)
}
