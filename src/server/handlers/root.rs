use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Map, Value};

use crate::state::AppState;

const ENDPOINTS: [(&str, &str); 6] = [
    ("/api/health", "Health check"),
    ("/api/chat", "Chat with AI assistant (POST)"),
    ("/api/warmup", "Warmup RAG system (GET)"),
    ("/health", "Health check (no prefix)"),
    ("/chat", "Chat with AI assistant (POST, no prefix)"),
    ("/warmup", "Warmup RAG system (GET, no prefix)"),
];

pub async fn root(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let endpoints: Map<String, Value> = ENDPOINTS
        .iter()
        .map(|(path, description)| (path.to_string(), Value::from(*description)))
        .collect();

    Json(json!({
        "message": "Welcome to Prabhav Jain's AI Portfolio API",
        "endpoints": endpoints,
        "rag_enabled": state.resolver.rag_enabled()
    }))
}
