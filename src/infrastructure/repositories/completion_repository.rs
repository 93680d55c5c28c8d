use crate::domain::shared::ProviderError;
use async_trait::async_trait;

/// Repository for text-completion calls.
/// Abstracts the underlying language model provider (OpenAI, etc.)
#[async_trait]
pub trait CompletionRepository: Send + Sync {
    /// Whether credentials were supplied at startup
    fn is_configured(&self) -> bool {
        true
    }

    /// Complete a system + user prompt pair
    ///
    /// Returns `Ok(None)` when the provider answered without any text.
    ///
    /// # Errors
    /// Returns a classified [`ProviderError`] (rate limit, auth, network, timeout, other)
    async fn complete(&self, system: &str, user: &str) -> Result<Option<String>, ProviderError>;
}
