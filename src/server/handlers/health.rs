use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::state::AppState;

const HEALTH_MESSAGE: &str = "Prabhav's AI Portfolio API is running";

/// Reports capability (`rag_enabled`), not whether the pipeline has been built.
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "message": HEALTH_MESSAGE,
        "rag_enabled": state.resolver.rag_enabled()
    }))
}
