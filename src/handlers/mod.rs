pub mod analyze;
pub mod health;

pub use analyze::{analyze_handler, cancel_handler, status_handler};
pub use health::{health_handler, ready_handler};

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::orchestrator::Orchestrator;

/// Shared handler state: configuration plus the session registry.
pub struct AppState {
    pub config: Config,
    pub orchestrator: Arc<Orchestrator>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let orchestrator = Arc::new(Orchestrator::new(config.clone()));
        Self {
            config,
            orchestrator,
        }
    }
}

/// Transport-level body bound. Kept well above the configured file cap so an
/// oversized upload still reaches the handler's own size check and gets a
/// FILE_TOO_LARGE response rather than a multipart framing error.
fn body_limit(config: &Config) -> usize {
    config.max_file_size_bytes() * 4 + 64 * 1024
}

pub fn router(state: Arc<AppState>) -> Router {
    let body_limit = body_limit(&state.config);

    Router::new()
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/api/v1/analyze", post(analyze_handler))
        .route(
            "/api/v1/analyze/:id",
            get(status_handler).delete(cancel_handler),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(state)
}
