//! User identification for protected routes.
//!
//! The caller's identity is supplied by an upstream identity provider in the
//! `X-User-Id` header. The value is opaque to this service.

use axum::{
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};

use gst_invoice_shared::AppError;
use gst_invoice_shared::types::UserId;

use crate::error::ApiError;

/// Header carrying the authenticated user's identifier.
pub const USER_ID_HEADER: &str = "x-user-id";

fn unauthorized(message: &str) -> ApiError {
    ApiError(AppError::Unauthorized(message.to_string()))
}

/// Middleware that rejects requests without a usable `X-User-Id`.
///
/// On success the [`UserId`] is stored in request extensions for
/// [`AuthUser`] to pick up.
pub async fn require_user(mut request: Request, next: Next) -> Response {
    let user_id = request
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|value| UserId::new(value).ok());

    let Some(user_id) = user_id else {
        return unauthorized("X-User-Id header is required").into_response();
    };

    request.extensions_mut().insert(user_id);
    next.run(request).await
}

/// Extractor for the authenticated user.
///
/// ```ignore
/// async fn handler(auth: AuthUser) -> impl IntoResponse {
///     let user_id = auth.user_id();
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub UserId);

impl AuthUser {
    /// Returns the user ID.
    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<UserId>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| unauthorized("Authentication required"))
    }
}
