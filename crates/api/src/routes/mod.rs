//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::require_user};

pub mod health;
pub mod invoices;
pub mod preview;

/// Creates the API router: public health and preview routes plus the
/// user-scoped invoice routes.
pub fn api_routes() -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(invoices::routes())
        .route_layer(middleware::from_fn(require_user));

    Router::new()
        .merge(health::routes())
        .merge(preview::routes())
        .merge(protected_routes)
}
