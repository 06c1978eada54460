use std::sync::Arc;

use async_trait::async_trait;

use super::index::VectorIndex;
use super::loader::load_documents;
use super::pipeline::RagPipeline;
use super::provider::{PipelineFactory, QueryPipeline};
use super::prompt::PromptTemplate;
use super::splitter::{SplitterConfig, TextSplitter};
use crate::core::config::ConfigService;
use crate::core::errors::PipelineError;
use crate::llm::{EmbeddingProvider, GroqProvider, HuggingFaceEmbeddings};

type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Builds the corpus-backed RAG pipeline from the current configuration.
pub struct RagPipelineBuilder {
    config: ConfigService,
    env: EnvLookup,
}

impl RagPipelineBuilder {
    pub fn new(config: ConfigService) -> Self {
        Self::with_env(config, Arc::new(|key: &str| std::env::var(key).ok()))
    }

    /// Uses `env` instead of the process environment for config overrides.
    pub fn with_env(config: ConfigService, env: EnvLookup) -> Self {
        Self { config, env }
    }
}

#[async_trait]
impl PipelineFactory for RagPipelineBuilder {
    async fn build(&self) -> Result<Arc<dyn QueryPipeline>, PipelineError> {
        tracing::info!("Building new RAG pipeline");

        // reloaded on every attempt so a fixed secrets file is picked up on retry
        let env = self.env.clone();
        let config = self.config.load_config_with(move |key| env(key))?;

        let api_key = config
            .secrets
            .groq_api_key()
            .ok_or(PipelineError::MissingConfig("GROQ_API_KEY"))?;
        let hf_token = config
            .secrets
            .huggingface_token()
            .ok_or(PipelineError::MissingConfig("HUGGINGFACEHUB_API_TOKEN"))?;

        let chat = GroqProvider::new(&config.llm, api_key)?;
        tracing::info!("Generation model: {}", chat.model());
        let prompt = PromptTemplate::guardrail();

        let corpus_dir = self.config.paths().resolve(&config.rag.corpus_dir);
        tracing::info!("Loading documents from: {}", corpus_dir.display());
        let documents = {
            let dir = corpus_dir.clone();
            let extension = config.rag.corpus_extension.clone();
            tokio::task::spawn_blocking(move || load_documents(&dir, &extension))
                .await
                .map_err(|e| PipelineError::Corpus {
                    path: corpus_dir.display().to_string(),
                    message: e.to_string(),
                })??
        };

        let splitter = TextSplitter::new(SplitterConfig {
            chunk_size: config.rag.chunk_size,
            chunk_overlap: config.rag.chunk_overlap,
        });
        let chunks = splitter.split_documents(&documents);
        if chunks.is_empty() {
            return Err(PipelineError::EmptyCorpus(corpus_dir.display().to_string()));
        }
        tracing::info!(
            "Split {} documents into {} chunks",
            documents.len(),
            chunks.len()
        );

        let embeddings = HuggingFaceEmbeddings::new(&config.embedding, hf_token)?;
        tracing::info!("Embedding chunks with {}", embeddings.model());
        let texts: Vec<String> = chunks.iter().map(|chunk| chunk.text.clone()).collect();
        let vectors = embeddings.embed(&texts).await?;

        let index = VectorIndex::build(chunks, vectors)?;
        tracing::info!(
            "Similarity index built ({} vectors, dimension {})",
            index.chunk_count(),
            index.dimension()
        );

        let embeddings: Arc<dyn EmbeddingProvider> = Arc::new(embeddings);
        Ok(Arc::new(RagPipeline::new(
            index,
            embeddings,
            Arc::new(chat),
            prompt,
            config.rag.top_k,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::AppPaths;
    use crate::test_support::spawn_mock_server;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::fs;
    use std::path::Path;

    fn builder_in(root: &Path, env: HashMap<&'static str, String>) -> RagPipelineBuilder {
        let paths = AppPaths::with_dirs(root.to_path_buf(), root.join("state"));
        let config = ConfigService::new(Arc::new(paths));
        RagPipelineBuilder::with_env(config, Arc::new(move |key: &str| env.get(key).cloned()))
    }

    async fn mock_services() -> String {
        let app = Router::new()
            .route(
                "/pipeline/feature-extraction/sentence-transformers/all-MiniLM-L6-v2",
                post(|Json(body): Json<Value>| async move {
                    let vectors: Vec<Vec<f32>> = body["inputs"]
                        .as_array()
                        .map(|inputs| {
                            inputs
                                .iter()
                                .map(|text| {
                                    let text = text.as_str().unwrap_or_default().to_lowercase();
                                    vec![text.contains("tapnex") as u8 as f32, 0.1]
                                })
                                .collect()
                        })
                        .unwrap_or_default();
                    Json(vectors)
                }),
            )
            .route(
                "/v1/chat/completions",
                post(|Json(body): Json<Value>| async move {
                    let prompt = body["messages"][0]["content"].as_str().unwrap_or_default();
                    let content = if prompt.contains("Tapnex runs cashless events.") {
                        "Tapnex is Prabhav's event platform."
                    } else {
                        "context missing"
                    };
                    Json(json!({"choices": [{"message": {"content": content}}]}))
                }),
            );
        spawn_mock_server(app).await
    }

    fn write_config(root: &Path, base_url: &str) {
        fs::write(
            root.join("config.yml"),
            format!(
                "llm:\n  base_url: {base}\nembedding:\n  endpoint: {base}\n",
                base = base_url
            ),
        )
        .unwrap();
    }

    fn full_env() -> HashMap<&'static str, String> {
        HashMap::from([
            ("GROQ_API_KEY", "gsk-test".to_string()),
            ("HUGGINGFACEHUB_API_TOKEN", "hf-test".to_string()),
        ])
    }

    #[tokio::test]
    async fn missing_api_key_fails_before_any_io() {
        let dir = tempfile::tempdir().unwrap();
        let builder = builder_in(dir.path(), HashMap::new());

        let err = builder.build().await.err().unwrap();
        assert!(matches!(err, PipelineError::MissingConfig("GROQ_API_KEY")));
    }

    #[tokio::test]
    async fn missing_embedding_token_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let env = HashMap::from([("GROQ_API_KEY", "gsk".to_string())]);
        let err = builder_in(dir.path(), env).build().await.err().unwrap();

        assert!(matches!(
            err,
            PipelineError::MissingConfig("HUGGINGFACEHUB_API_TOKEN")
        ));
    }

    #[tokio::test]
    async fn empty_corpus_is_a_construction_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("data")).unwrap();
        fs::write(dir.path().join("data/blank.md"), "   \n").unwrap();

        let err = builder_in(dir.path(), full_env()).build().await.err().unwrap();
        assert!(matches!(err, PipelineError::EmptyCorpus(_)));
    }

    #[tokio::test]
    async fn builds_pipeline_that_answers_from_corpus() {
        let dir = tempfile::tempdir().unwrap();
        let base_url = mock_services().await;
        write_config(dir.path(), &base_url);
        fs::create_dir_all(dir.path().join("data")).unwrap();
        fs::write(dir.path().join("data/tapnex.md"), "Tapnex runs cashless events.").unwrap();
        fs::write(dir.path().join("data/club.md"), "Prabhav leads a club.").unwrap();

        let pipeline = builder_in(dir.path(), full_env()).build().await.unwrap();
        let answer = pipeline.invoke("What is Tapnex?").await.unwrap();

        assert_eq!(answer, "Tapnex is Prabhav's event platform.");
    }
}
