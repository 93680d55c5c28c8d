pub mod error;
pub mod provider_error;
pub mod retry;

pub use error::{ProviderOperation, StoryError};
pub use provider_error::ProviderError;
pub use retry::{with_retry, RetryPolicy};
