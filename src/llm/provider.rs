use async_trait::async_trait;

use super::types::ChatRequest;
use crate::core::errors::PipelineError;

#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// provider name used in logs (e.g. "groq")
    fn name(&self) -> &str;

    /// chat completion (non-streaming)
    async fn chat(&self, request: ChatRequest) -> Result<String, PipelineError>;
}

#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    fn name(&self) -> &str;

    /// one vector per input, in input order
    async fn embed(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, PipelineError>;
}
