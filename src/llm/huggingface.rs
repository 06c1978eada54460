use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use super::provider::EmbeddingProvider;
use crate::core::config::types::EmbeddingConfig;
use crate::core::errors::PipelineError;

/// Sentence embeddings through the Hugging Face inference feature-extraction pipeline.
#[derive(Clone)]
pub struct HuggingFaceEmbeddings {
    endpoint: String,
    model: String,
    api_token: String,
    batch_size: usize,
    client: Client,
}

impl HuggingFaceEmbeddings {
    pub fn new(
        config: &EmbeddingConfig,
        api_token: impl Into<String>,
    ) -> Result<Self, PipelineError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(PipelineError::embedding)?;

        Ok(Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_token: api_token.into(),
            batch_size: config.batch_size.max(1),
            client,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn embed_batch(&self, batch: &[String]) -> Result<Vec<Vec<f32>>, PipelineError> {
        let url = format!("{}/pipeline/feature-extraction/{}", self.endpoint, self.model);
        let body = json!({
            "inputs": batch,
            "options": {"wait_for_model": true},
        });

        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(&body)
            .send()
            .await
            .map_err(PipelineError::embedding)?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(PipelineError::Embedding(format!(
                "Hugging Face embed error ({}): {}",
                status, text
            )));
        }

        let vectors: Vec<Vec<f32>> = res.json().await.map_err(PipelineError::embedding)?;
        if vectors.len() != batch.len() {
            return Err(PipelineError::Embedding(format!(
                "expected {} embeddings, got {}",
                batch.len(),
                vectors.len()
            )));
        }

        Ok(vectors)
    }
}

#[async_trait]
impl EmbeddingProvider for HuggingFaceEmbeddings {
    fn name(&self) -> &str {
        "huggingface"
    }

    async fn embed(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>, PipelineError> {
        let mut embeddings = Vec::with_capacity(inputs.len());
        for (index, batch) in inputs.chunks(self.batch_size).enumerate() {
            tracing::debug!(
                "Embedding batch {} ({} texts) with {}",
                index,
                batch.len(),
                self.model
            );
            embeddings.extend(self.embed_batch(batch).await?);
        }
        Ok(embeddings)
    }
}
