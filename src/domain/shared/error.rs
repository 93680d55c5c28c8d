use super::provider_error::ProviderError;
use crate::error::AppError;

/// Which public operation a provider failure happened in; selects the wording
/// of rate-limit and fallback messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderOperation {
    Story,
    Speech,
}

/// Terminal failure of a `generate` or `synthesize` call. Every variant carries a
/// message that can be shown to the end user as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoryError {
    #[error("{0}")]
    Configuration(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Format(String),
    #[error("{0}")]
    RateLimit(String),
    #[error("{0}")]
    Auth(String),
    #[error("{0}")]
    Network(String),
    #[error("{0}")]
    Timeout(String),
    #[error("{0}")]
    Generation(String),
    #[error("{0}")]
    Unknown(String),
}

impl StoryError {
    /// Translate a classified provider failure into a user-presentable error
    pub fn from_provider(err: ProviderError, operation: ProviderOperation) -> Self {
        match err.normalized() {
            ProviderError::RateLimited(_) => match operation {
                ProviderOperation::Story => StoryError::RateLimit(
                    "Story limit reached for today. Please try again tomorrow.".to_string(),
                ),
                ProviderOperation::Speech => StoryError::RateLimit(
                    "Speech generation limit reached. Please try again later.".to_string(),
                ),
            },
            ProviderError::Unauthorized(_) => StoryError::Auth(
                "Provider API key is invalid or expired. Please check your configuration."
                    .to_string(),
            ),
            ProviderError::Network(_) => StoryError::Network(
                "Network error occurred. Please check your internet connection and try again."
                    .to_string(),
            ),
            ProviderError::Timeout(_) | ProviderError::Aborted(_) => {
                StoryError::Timeout("Request timed out. Please try again.".to_string())
            }
            ProviderError::Other(message) => {
                tracing::error!(
                    operation = ?operation,
                    error = %message,
                    "Unclassified provider error"
                );
                let message = if message.is_empty() {
                    "Unknown error occurred".to_string()
                } else {
                    message
                };
                let action = match operation {
                    ProviderOperation::Story => "story",
                    ProviderOperation::Speech => "speech",
                };
                StoryError::Unknown(format!(
                    "Failed to generate {}: {}. Please try again later.",
                    action, message
                ))
            }
        }
    }
}

impl From<StoryError> for AppError {
    fn from(err: StoryError) -> Self {
        match err {
            StoryError::Validation(msg) => AppError::BadRequest(msg),
            StoryError::RateLimit(msg) => AppError::RateLimitExceeded(msg),
            StoryError::Configuration(msg) => AppError::ServiceUnavailable(msg),
            StoryError::Timeout(msg) => AppError::GatewayTimeout(msg),
            StoryError::Auth(msg)
            | StoryError::Format(msg)
            | StoryError::Network(msg)
            | StoryError::Generation(msg)
            | StoryError::Unknown(msg) => AppError::ExternalService(msg),
        }
    }
}
