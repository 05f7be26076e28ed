//! Bearer token middleware for the transfer routes.
//!
//! A request without `Authorization: Bearer <token>` is answered with 401; a
//! token that fails verification gets 403. On success the verified [`Claims`]
//! are stored in the request extensions for handlers to extract.

use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use super::error::ApiError;
use crate::domain::{AuthError, TokenService};

fn bearer_token(request: &Request<Body>) -> Option<&str> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

pub async fn require_auth(
    State(token_service): State<TokenService>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(&request).ok_or(AuthError::MissingToken)?;

    let claims = token_service.verify(token).map_err(|e| {
        warn!("Rejected token on {}: {:?}", request.uri().path(), e);
        e
    })?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
