//! Simple API Key Authentication (Bearer Token)
//!
//! Protects the session/chat routes with a single server-side bearer
//! token. When no key is configured, authentication is disabled; this is
//! separate from the per-session model credentials, which never pass
//! through here.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::config::ServerConfig;

/// Authentication middleware; validates `Authorization: Bearer <key>`
/// against the configured server API key
pub async fn auth_middleware(
    State(config): State<Arc<ServerConfig>>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(api_key) = config.api_key.as_deref() else {
        // No API key configured = auth disabled (for development)
        return Ok(next.run(request).await);
    };

    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    match auth_header.and_then(|h| h.strip_prefix("Bearer ")) {
        Some(token) if token == api_key => Ok(next.run(request).await),
        Some(_) => {
            tracing::warn!("invalid API key attempted");
            Err(StatusCode::UNAUTHORIZED)
        }
        None => {
            tracing::warn!("missing or malformed Authorization header");
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}
