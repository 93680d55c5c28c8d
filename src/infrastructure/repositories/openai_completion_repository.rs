use super::completion_repository::CompletionRepository;
use super::openai_error::classify_openai_error;
use crate::domain::shared::ProviderError;
use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;

const TEMPERATURE: f32 = 0.7;

/// OpenAI chat-completion implementation of the completion repository
pub struct OpenAiCompletionRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
}

impl OpenAiCompletionRepository {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String) -> Self {
        Self { client, model }
    }
}

#[async_trait]
impl CompletionRepository for OpenAiCompletionRepository {
    async fn complete(&self, system: &str, user: &str) -> Result<Option<String>, ProviderError> {
        let start_time = std::time::Instant::now();

        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .messages(vec![
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system)
                    .build()
                    .map_err(classify_openai_error)?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(user)
                    .build()
                    .map_err(classify_openai_error)?
                    .into(),
            ])
            .temperature(TEMPERATURE)
            .presence_penalty(0.0)
            .frequency_penalty(0.0)
            .build()
            .map_err(classify_openai_error)?;

        tracing::info!(
            model = %self.model,
            system_length = system.len(),
            user_length = user.len(),
            "Calling OpenAI chat completion"
        );

        let response = self.client.chat().create(request).await.map_err(|e| {
            tracing::error!(error = %e, model = %self.model, "OpenAI chat completion failed");
            classify_openai_error(e)
        })?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content);

        tracing::info!(
            provider = "openai",
            model = %self.model,
            latency_ms = start_time.elapsed().as_millis(),
            content_length = content.as_ref().map(|c| c.len()).unwrap_or(0),
            "Chat completion received"
        );

        Ok(content)
    }
}
