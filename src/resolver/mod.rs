//! Question → answer resolution with pipeline memoization and static fallback.

mod answer;
mod fallback;

use std::sync::Arc;

use tokio::sync::OnceCell;

pub use answer::{Answer, AnswerStatus, Provenance, INVALID_QUESTION_ANSWER};
pub use fallback::{FallbackRule, FallbackTable};

use crate::core::errors::PipelineError;
use crate::rag::{PipelineFactory, QueryPipeline};

/// Resolves questions, preferring the RAG pipeline and degrading to the fallback table.
///
/// The pipeline is built at most once. Concurrent first callers wait on the same
/// in-flight build, and a failed build leaves the slot empty so the next call retries.
pub struct AnswerResolver {
    factory: Option<Arc<dyn PipelineFactory>>,
    pipeline: Arc<OnceCell<Arc<dyn QueryPipeline>>>,
    fallback: FallbackTable,
}

impl AnswerResolver {
    pub fn new(factory: Option<Arc<dyn PipelineFactory>>, fallback: FallbackTable) -> Self {
        Self {
            factory,
            pipeline: Arc::new(OnceCell::new()),
            fallback,
        }
    }

    /// Resolver with the RAG subsystem switched off.
    pub fn fallback_only(fallback: FallbackTable) -> Self {
        Self::new(None, fallback)
    }

    /// Whether a pipeline can be built at all; says nothing about whether it has been.
    pub fn rag_enabled(&self) -> bool {
        self.factory.is_some()
    }

    pub fn is_built(&self) -> bool {
        self.pipeline.initialized()
    }

    /// Returns the memoized pipeline, building it on first use.
    ///
    /// The build runs on a detached task that fills the shared cell itself, so
    /// a caller that goes away mid-build does not cancel it.
    pub async fn pipeline(&self) -> Result<Arc<dyn QueryPipeline>, PipelineError> {
        let factory = self.factory.clone().ok_or(PipelineError::Disabled)?;

        if let Some(pipeline) = self.pipeline.get() {
            tracing::debug!("Returning cached RAG pipeline");
            return Ok(pipeline.clone());
        }

        let cell = Arc::clone(&self.pipeline);
        let build = tokio::spawn(async move {
            cell.get_or_try_init(|| async move {
                let built = factory.build().await;
                match &built {
                    Ok(_) => tracing::info!("RAG pipeline built and cached"),
                    Err(err) => tracing::error!("RAG pipeline construction failed: {}", err),
                }
                built
            })
            .await
            .cloned()
        });

        build
            .await
            .map_err(|err| PipelineError::Build(err.to_string()))?
    }

    /// Never fails; always yields a non-empty answer.
    pub async fn resolve(&self, question: &str) -> Answer {
        if question.trim().is_empty() {
            return Answer::invalid_question();
        }

        if self.rag_enabled() {
            match self.answer_with_pipeline(question).await {
                Ok(text) => return Answer::from_pipeline(text),
                Err(err) => {
                    tracing::warn!("RAG answer unavailable, falling back to static table: {}", err)
                }
            }
        }

        Answer::from_fallback(self.fallback.lookup(question))
    }

    async fn answer_with_pipeline(&self, question: &str) -> Result<String, PipelineError> {
        let pipeline = self.pipeline().await?;
        let answer = pipeline.invoke(question).await?;
        if answer.trim().is_empty() {
            return Err(PipelineError::EmptyAnswer);
        }
        Ok(answer)
    }
}
