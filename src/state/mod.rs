use std::sync::Arc;

use crate::core::config::{AppConfig, AppPaths, ConfigService};
use crate::rag::PipelineFactory;
use crate::resolver::{AnswerResolver, FallbackTable};

pub mod error;

use error::InitializationError;

/// Application state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    pub config: ConfigService,
    pub resolver: Arc<AnswerResolver>,
}

impl AppState {
    /// Loads configuration and wires the resolver.
    ///
    /// The RAG pipeline itself is not built here; that happens on warmup or the
    /// first chat request. The subsystem is off when the `rag` feature is not
    /// compiled in or `rag.enabled` is false.
    pub fn initialize(paths: Arc<AppPaths>) -> Result<Arc<Self>, InitializationError> {
        let config = ConfigService::new(paths);
        let app_config = config.load_config()?;
        tracing::debug!("Effective config: {}", config.redacted_config());

        let factory = pipeline_factory(&config, &app_config);
        let resolver = Arc::new(AnswerResolver::new(factory, FallbackTable::portfolio()));
        Ok(Self::with_resolver(config, resolver))
    }

    pub fn with_resolver(config: ConfigService, resolver: Arc<AnswerResolver>) -> Arc<Self> {
        Arc::new(AppState {
            config,
            resolver,
        })
    }
}

#[cfg(feature = "rag")]
fn pipeline_factory(
    config: &ConfigService,
    app_config: &AppConfig,
) -> Option<Arc<dyn PipelineFactory>> {
    if !app_config.rag.enabled {
        tracing::warn!("RAG disabled by config (rag.enabled = false). Using mock responses.");
        return None;
    }
    Some(Arc::new(crate::rag::RagPipelineBuilder::new(config.clone())))
}

#[cfg(not(feature = "rag"))]
fn pipeline_factory(
    _config: &ConfigService,
    _app_config: &AppConfig,
) -> Option<Arc<dyn PipelineFactory>> {
    tracing::warn!("Built without the `rag` feature. Using mock responses.");
    None
}
