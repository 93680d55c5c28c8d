use crate::domain::shared::ProviderError;
use async_trait::async_trait;

/// Repository for illustration generation
#[async_trait]
pub trait ImageRepository: Send + Sync {
    fn is_configured(&self) -> bool {
        true
    }

    /// Generate exactly one square image for `prompt`
    ///
    /// Returns the image URL, or `Ok(None)` when the provider returned no locator.
    async fn generate_image(&self, prompt: &str) -> Result<Option<String>, ProviderError>;
}
