//! Domain Errors
//!
//! Typed failure kinds for the model chain. Remote failures are propagated
//! as distinct variants rather than encoded into success-looking strings;
//! only the transcript-rendering boundary turns them back into the marked
//! inline text users see.

use thiserror::Error;
use uuid::Uuid;

/// Marker prefixed to error text rendered inline in a transcript
pub const ERROR_MARKER: &str = "❌";

/// Model-chain errors
#[derive(Debug, Clone, Error)]
pub enum ChainError {
    #[error("model credentials missing for this session")]
    MissingCredentials,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("authentication rejected by model endpoint: {0}")]
    Authentication(String),

    #[error("rate limited by model endpoint: {0}")]
    RateLimited(String),

    #[error("model endpoint error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("malformed model response: {0}")]
    MalformedResponse(String),

    #[error("reasoning output failed validation: {0}")]
    InvalidAnalysis(String),

    #[error("session not found: {0}")]
    SessionNotFound(Uuid),
}

impl ChainError {
    /// Map an upstream HTTP status plus body into the matching variant
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => Self::Authentication(message),
            429 => Self::RateLimited(message),
            _ => Self::Api { status, message },
        }
    }

    /// Inline rendering for the chat transcript, marked so failures stay
    /// distinguishable from ordinary assistant text
    pub fn user_message(&self) -> String {
        format!("{ERROR_MARKER} {self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_mapping() {
        assert!(matches!(
            ChainError::from_status(401, "bad key"),
            ChainError::Authentication(_)
        ));
        assert!(matches!(
            ChainError::from_status(403, "forbidden"),
            ChainError::Authentication(_)
        ));
        assert!(matches!(
            ChainError::from_status(429, "slow down"),
            ChainError::RateLimited(_)
        ));
        assert!(matches!(
            ChainError::from_status(500, "boom"),
            ChainError::Api { status: 500, .. }
        ));
    }

    #[test]
    fn test_user_message_carries_marker_and_description() {
        let err = ChainError::Transport("connection refused".to_string());
        let rendered = err.user_message();
        assert!(rendered.starts_with(ERROR_MARKER));
        assert!(rendered.contains("connection refused"));
    }
}
