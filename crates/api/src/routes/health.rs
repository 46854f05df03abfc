//! Health check endpoint.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::AppState;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
    /// `"file"` when records are persisted, `"memory"` otherwise.
    pub storage: &'static str,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let storage = if state.repository.path().is_some() {
        "file"
    } else {
        "memory"
    };
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        storage,
    })
}

/// Creates health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
