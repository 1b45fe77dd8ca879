use std::sync::Arc;
use std::time::SystemTime;

use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};
use tracing::info;

use crate::error::AppResult;
use crate::handlers::AppState;
use crate::middleware::rate_limit::get_admission_metrics;

/// Health check endpoint
pub async fn health_handler(State(state): State<Arc<AppState>>) -> AppResult<Json<Value>> {
    let timestamp = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    let (total_submissions, rejected_submissions, available_permits) = get_admission_metrics();

    let response = json!({
        "status": "healthy",
        "timestamp": timestamp,
        "version": env!("CARGO_PKG_VERSION"),
        "limits": {
            "max_file_size_mb": state.config.max_file_size_mb,
            "max_concurrent_analyses": state.config.max_concurrent_analyses,
            "stage_timeout_seconds": state.config.stage_timeout_seconds,
        },
        "admission": {
            "total_submissions": total_submissions,
            "rejected_submissions": rejected_submissions,
            "available_permits": available_permits,
        }
    });

    Ok(Json(response))
}

/// Readiness check endpoint (for Kubernetes/Railway)
pub async fn ready_handler(State(state): State<Arc<AppState>>) -> Result<StatusCode, StatusCode> {
    // A valid weight table is the one piece of state that can make every
    // analysis fail; refuse traffic if it is broken.
    match state.config.weights.validate() {
        Ok(()) => {
            info!("Readiness check passed");
            Ok(StatusCode::OK)
        }
        Err(_) => {
            info!("Readiness check failed, invalid score weights");
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}
