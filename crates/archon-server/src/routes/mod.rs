//! Archon API Routes
//!
//! - /archon/sessions - Session lifecycle and credentials
//! - /archon/sessions/:id/chat - Two-stage chain interaction
//! - /archon/sessions/:id/transcript - Transcript snapshot / clear
//! - /archon/sessions/:id/export - Explanation download (Markdown)

pub mod chat;
pub mod export;
pub mod session;
pub mod swagger;

use axum::http::StatusCode;

use archon::ChainError;

/// Map a chain error onto an HTTP response.
///
/// Preconditions and lookups are client errors; everything that went
/// wrong at or behind the model endpoints surfaces as a bad gateway.
pub(crate) fn error_response(err: ChainError) -> (StatusCode, String) {
    let status = match &err {
        ChainError::MissingCredentials => StatusCode::BAD_REQUEST,
        ChainError::SessionNotFound(_) => StatusCode::NOT_FOUND,
        ChainError::Transport(_)
        | ChainError::Authentication(_)
        | ChainError::RateLimited(_)
        | ChainError::Api { .. }
        | ChainError::MalformedResponse(_)
        | ChainError::InvalidAnalysis(_) => StatusCode::BAD_GATEWAY,
    };
    (status, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_error_status_mapping() {
        let (status, _) = error_response(ChainError::MissingCredentials);
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = error_response(ChainError::SessionNotFound(Uuid::new_v4()));
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = error_response(ChainError::Transport("timed out".to_string()));
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body.contains("timed out"));
    }
}
