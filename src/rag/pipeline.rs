use std::sync::Arc;

use async_trait::async_trait;

use super::index::VectorIndex;
use super::prompt::{stuff_documents, PromptTemplate};
use super::provider::QueryPipeline;
use crate::core::errors::PipelineError;
use crate::llm::{ChatMessage, ChatProvider, ChatRequest, EmbeddingProvider};

/// Retrieval (top-k cosine over the corpus index) followed by prompt-stuffed generation.
pub struct RagPipeline {
    index: VectorIndex,
    embeddings: Arc<dyn EmbeddingProvider>,
    chat: Arc<dyn ChatProvider>,
    prompt: PromptTemplate,
    top_k: usize,
}

impl RagPipeline {
    pub fn new(
        index: VectorIndex,
        embeddings: Arc<dyn EmbeddingProvider>,
        chat: Arc<dyn ChatProvider>,
        prompt: PromptTemplate,
        top_k: usize,
    ) -> Self {
        Self {
            index,
            embeddings,
            chat,
            prompt,
            top_k,
        }
    }
}

#[async_trait]
impl QueryPipeline for RagPipeline {
    async fn invoke(&self, question: &str) -> Result<String, PipelineError> {
        let query_embedding = self
            .embeddings
            .embed(&[question.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| PipelineError::Embedding("no embedding returned for query".to_string()))?;

        let hits = self.index.similarity_search(&query_embedding, self.top_k)?;
        for hit in &hits {
            tracing::debug!(
                "Retrieved {}#{} (score {:.3})",
                hit.chunk.source,
                hit.chunk.chunk_index,
                hit.score
            );
        }

        let prompt = self.prompt.render(&stuff_documents(&hits), question);
        let request = ChatRequest::new(vec![ChatMessage::user(prompt)]);
        tracing::info!("Invoking {} with {} context chunks", self.chat.name(), hits.len());
        self.chat.chat(request).await
    }
}
