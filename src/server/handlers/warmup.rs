use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::state::AppState;

/// Builds the pipeline ahead of the first real question.
pub async fn warmup(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    if !state.resolver.rag_enabled() {
        return Json(json!({
            "status": "success",
            "message": "Using mock responses (RAG not available)",
            "warmed_up": true
        }));
    }

    tracing::info!("Warming up RAG system...");
    match state.resolver.pipeline().await {
        Ok(_) => {
            tracing::info!("RAG system warmed up successfully");
            Json(json!({
                "status": "success",
                "message": "RAG system is ready",
                "warmed_up": true
            }))
        }
        Err(err) => {
            tracing::warn!("Warmup error: {}", err);
            Json(json!({
                "status": "error",
                "message": format!("Warmup failed: {}", err),
                "warmed_up": false
            }))
        }
    }
}
