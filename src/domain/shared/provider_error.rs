/// Failure reported by an external generative provider (text, image or speech).
///
/// Provider repositories translate their SDK errors into one of these kinds so the
/// retry executor and the service boundary can classify them without knowing which
/// vendor produced them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("rate limit exceeded: {0}")]
    RateLimited(String),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("timeout: {0}")]
    Timeout(String),
    #[error("request aborted: {0}")]
    Aborted(String),
    #[error("{0}")]
    Other(String),
}

impl ProviderError {
    /// Classify a failed HTTP exchange by its status code
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            429 => ProviderError::RateLimited(message),
            401 | 403 => ProviderError::Unauthorized(message),
            408 | 504 => ProviderError::Timeout(message),
            _ => ProviderError::Other(message).normalized(),
        }
    }

    /// Promote an unclassified error whose message names a timeout or a network
    /// problem to the matching kind.
    pub fn normalized(self) -> Self {
        match self {
            ProviderError::Other(message) => {
                let lowered = message.to_lowercase();
                if lowered.contains("timeout") || lowered.contains("timed out") {
                    ProviderError::Timeout(message)
                } else if lowered.contains("network") {
                    ProviderError::Network(message)
                } else {
                    ProviderError::Other(message)
                }
            }
            other => other,
        }
    }

    /// Rate limits, timeouts and aborted calls are worth another attempt.
    pub fn is_retriable(&self) -> bool {
        matches!(
            self.clone().normalized(),
            ProviderError::RateLimited(_) | ProviderError::Timeout(_) | ProviderError::Aborted(_)
        )
    }

    pub fn message(&self) -> &str {
        match self {
            ProviderError::RateLimited(msg)
            | ProviderError::Unauthorized(msg)
            | ProviderError::Network(msg)
            | ProviderError::Timeout(msg)
            | ProviderError::Aborted(msg)
            | ProviderError::Other(msg) => msg,
        }
    }
}
