//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes for previewing and saving invoices
//! - User identification middleware
//! - JSON error responses

pub mod error;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use gst_invoice_shared::InvoiceDefaults;
use gst_invoice_store::InvoiceRepository;

/// Largest accepted request body.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Saved invoice records.
    pub repository: InvoiceRepository,
    /// Defaults applied to incoming invoices.
    pub defaults: Arc<InvoiceDefaults>,
}

impl AppState {
    /// Creates state from a repository and invoice defaults.
    #[must_use]
    pub fn new(repository: InvoiceRepository, defaults: InvoiceDefaults) -> Self {
        Self {
            repository,
            defaults: Arc::new(defaults),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
