use super::{CompletionRepository, ImageRepository, TtsRepository};
use crate::domain::shared::ProviderError;
use async_trait::async_trait;

/// Stand-in provider used when no credentials were supplied at startup.
/// Reports itself as unconfigured so services fail with a configuration error
/// before attempting any call.
pub struct UnconfiguredProvider {
    name: &'static str,
}

impl UnconfiguredProvider {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }

    fn error(&self) -> ProviderError {
        ProviderError::Other(format!("{} is not configured", self.name))
    }
}

#[async_trait]
impl CompletionRepository for UnconfiguredProvider {
    fn is_configured(&self) -> bool {
        false
    }

    async fn complete(&self, _system: &str, _user: &str) -> Result<Option<String>, ProviderError> {
        Err(self.error())
    }
}

#[async_trait]
impl ImageRepository for UnconfiguredProvider {
    fn is_configured(&self) -> bool {
        false
    }

    async fn generate_image(&self, _prompt: &str) -> Result<Option<String>, ProviderError> {
        Err(self.error())
    }
}

#[async_trait]
impl TtsRepository for UnconfiguredProvider {
    fn is_configured(&self) -> bool {
        false
    }

    async fn synthesize_chunk(&self, _text: &str) -> Result<Vec<u8>, ProviderError> {
        Err(self.error())
    }
}
