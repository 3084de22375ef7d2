//! The seam between the domain and whichever hosted language model answers prompts.

use crate::error::Error;
use async_trait::async_trait;

/// A hosted text completion service.
///
/// `generate` must report an HTTP 429 from the service as
/// `ExternalErrorKind::RateLimited` so callers can tell throttling apart from
/// other failures.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Sends `prompt` and returns the model's free-form text answer.
    async fn generate(&self, prompt: &str) -> Result<String, Error>;

    /// Counts the tokens in `text` without consuming generation quota.
    async fn count_tokens(&self, text: &str) -> Result<u32, Error>;
}
