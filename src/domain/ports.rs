use crate::utils::error::UpstreamError;
use async_trait::async_trait;

/// A text-completion backend: prompt in, raw completion text out.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, UpstreamError>;

    /// Model identifier reported by the health endpoint and logs.
    fn model(&self) -> &str;
}
