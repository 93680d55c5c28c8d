use super::image_repository::ImageRepository;
use super::openai_error::classify_openai_error;
use crate::domain::shared::ProviderError;
use async_openai::{
    config::OpenAIConfig,
    types::{
        CreateImageRequestArgs, Image, ImageModel, ImageQuality, ImageResponseFormat, ImageSize,
        ImageStyle,
    },
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;

/// OpenAI image implementation of the image repository: one 1024x1024 image,
/// standard quality, vivid style, returned as a URL
pub struct OpenAiImageRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
}

impl OpenAiImageRepository {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String) -> Self {
        Self { client, model }
    }

    fn image_model(&self) -> ImageModel {
        match self.model.as_str() {
            "dall-e-2" => ImageModel::DallE2,
            "dall-e-3" => ImageModel::DallE3,
            other => ImageModel::Other(other.to_string()),
        }
    }
}

#[async_trait]
impl ImageRepository for OpenAiImageRepository {
    async fn generate_image(&self, prompt: &str) -> Result<Option<String>, ProviderError> {
        let start_time = std::time::Instant::now();

        let request = CreateImageRequestArgs::default()
            .prompt(prompt)
            .model(self.image_model())
            .n(1)
            .size(ImageSize::S1024x1024)
            .quality(ImageQuality::Standard)
            .style(ImageStyle::Vivid)
            .response_format(ImageResponseFormat::Url)
            .build()
            .map_err(classify_openai_error)?;

        tracing::info!(
            model = %self.model,
            prompt_length = prompt.len(),
            "Calling OpenAI image generation"
        );

        let response = self.client.images().create(request).await.map_err(|e| {
            tracing::error!(error = %e, model = %self.model, "OpenAI image generation failed");
            classify_openai_error(e)
        })?;

        let url = response.data.iter().find_map(|image| match image.as_ref() {
            Image::Url { url, .. } => Some(url.clone()),
            _ => None,
        });

        tracing::info!(
            provider = "openai",
            model = %self.model,
            latency_ms = start_time.elapsed().as_millis(),
            has_url = url.is_some(),
            "Image generation completed"
        );

        Ok(url)
    }
}
