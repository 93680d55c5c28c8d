use crate::domain::shared::ProviderError;
use async_openai::error::OpenAIError;

/// Classify an OpenAI SDK error for retry and user-facing translation
pub fn classify_openai_error(err: OpenAIError) -> ProviderError {
    match err {
        OpenAIError::Reqwest(e) => {
            let message = e.to_string();
            if e.is_timeout() {
                ProviderError::Timeout(message)
            } else if let Some(status) = e.status() {
                ProviderError::from_status(status.as_u16(), message)
            } else if e.is_connect() || e.is_request() {
                ProviderError::Network(message)
            } else {
                ProviderError::Other(message).normalized()
            }
        }
        OpenAIError::ApiError(api) => {
            let kind = api.r#type.as_deref().unwrap_or_default();
            let lowered = api.message.to_lowercase();
            if kind == "insufficient_quota" || kind == "requests" || lowered.contains("rate limit") {
                ProviderError::RateLimited(api.message)
            } else if kind == "authentication_error"
                || lowered.contains("api key")
                || lowered.contains("unauthorized")
            {
                ProviderError::Unauthorized(api.message)
            } else {
                ProviderError::Other(api.message).normalized()
            }
        }
        other => ProviderError::Other(other.to_string()).normalized(),
    }
}
