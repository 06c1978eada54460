use std::sync::Arc;

use async_trait::async_trait;

use crate::core::errors::PipelineError;

/// A built question-answering pipeline.
#[async_trait]
pub trait QueryPipeline: Send + Sync {
    async fn invoke(&self, question: &str) -> Result<String, PipelineError>;
}

/// Constructs a pipeline from scratch. Callers are expected to memoize the result.
#[async_trait]
pub trait PipelineFactory: Send + Sync {
    async fn build(&self) -> Result<Arc<dyn QueryPipeline>, PipelineError>;
}
