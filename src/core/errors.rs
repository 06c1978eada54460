use thiserror::Error;

/// Failures while building or invoking the retrieval pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("RAG subsystem is disabled")]
    Disabled,
    #[error("missing required configuration: {0}")]
    MissingConfig(&'static str),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to load corpus from {path}: {message}")]
    Corpus { path: String, message: String },
    #[error("corpus at {0} contains no documents")]
    EmptyCorpus(String),
    #[error("embedding request failed: {0}")]
    Embedding(String),
    #[error("generation request failed: {0}")]
    Generation(String),
    #[error("pipeline build task failed: {0}")]
    Build(String),
    #[error("similarity index error: {0}")]
    Index(String),
    #[error("pipeline returned an empty answer")]
    EmptyAnswer,
}

impl PipelineError {
    pub fn embedding<E: std::fmt::Display>(err: E) -> Self {
        PipelineError::Embedding(err.to_string())
    }

    pub fn generation<E: std::fmt::Display>(err: E) -> Self {
        PipelineError::Generation(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config value for {field}: {message}")]
    Invalid { field: String, message: String },
    #[error("failed to parse config: {0}")]
    Parse(String),
}

impl ConfigError {
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field: field.to_string(),
            message: message.into(),
        }
    }
}
