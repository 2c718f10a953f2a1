//! Bearer token check
//!
//! Any `Authorization: Bearer <token>` header is accepted; the token itself
//! is not verified.

use axum::{
    extract::Request,
    http::header,
    middleware::Next,
    response::Response,
};

use crate::api::error::ApiError;

pub async fn require_bearer(req: Request, next: Next) -> Result<Response, ApiError> {
    let has_bearer = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("Bearer "));

    if !has_bearer {
        tracing::warn!("Rejected {} {}: missing bearer token", req.method(), req.uri().path());
        return Err(ApiError::Unauthorized);
    }

    Ok(next.run(req).await)
}
