use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::server::handlers::{chat, health, root, warmup};
use crate::state::AppState;

/// Every gateway route is served both bare and under the legacy `/api` prefix.
const ROUTE_PREFIXES: [&str; 2] = ["", "/api"];

/// Creates the application router with CORS and request tracing.
pub fn router(state: Arc<AppState>) -> Router {
    let cors_layer = build_cors_layer(&state);

    let mut router = Router::new();
    for prefix in ROUTE_PREFIXES {
        let root_path = if prefix.is_empty() { "/" } else { prefix };
        router = router
            .route(root_path, get(root::root))
            .route(&format!("{}/health", prefix), get(health::health))
            .route(&format!("{}/chat", prefix), post(chat::chat))
            .route(&format!("{}/warmup", prefix), get(warmup::warmup));
    }

    router
        .with_state(state)
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
}

fn build_cors_layer(state: &Arc<AppState>) -> CorsLayer {
    let origins = match state.config.load_config() {
        Ok(config) => config.server.cors_allowed_origins,
        Err(err) => {
            tracing::warn!(
                "Failed to load config while building CORS layer: {}; allowing any origin",
                err
            );
            Vec::new()
        }
    };

    CorsLayer::new()
        .allow_origin(resolve_allow_origin(&origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(AllowHeaders::any())
}

fn resolve_allow_origin(origins: &[String]) -> AllowOrigin {
    let allowed = origins
        .iter()
        .map(|origin| origin.trim())
        .filter(|origin| !origin.is_empty() && *origin != "*")
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect::<Vec<_>>();

    if allowed.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(allowed)
    }
}
