//! Session Entity
//!
//! Explicit per-user interaction context. The session owns its transcript
//! and the model credentials supplied for its lifetime; nothing here is
//! ever persisted to disk.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque bearer tokens for the two remote model endpoints.
///
/// Supplied per session through a masked input; never validated for format
/// and never written anywhere outside process memory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionCredentials {
    pub reasoning_api_key: Option<String>,
    pub explainer_api_key: Option<String>,
}

impl SessionCredentials {
    pub fn new(
        reasoning_api_key: impl Into<String>,
        explainer_api_key: impl Into<String>,
    ) -> Self {
        Self {
            reasoning_api_key: Some(reasoning_api_key.into()),
            explainer_api_key: Some(explainer_api_key.into()),
        }
    }

    /// Both keys present and non-empty.
    ///
    /// Checked once before the chain starts; when this fails the chain is
    /// never entered and no remote call is made.
    pub fn is_complete(&self) -> bool {
        let present = |key: &Option<String>| key.as_deref().is_some_and(|k| !k.trim().is_empty());
        present(&self.reasoning_api_key) && present(&self.explainer_api_key)
    }
}

/// One interactive session: credentials plus the conversation so far
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub credentials: SessionCredentials,
    pub transcript: super::Transcript,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(credentials: SessionCredentials) -> Self {
        Self {
            id: Uuid::new_v4(),
            credentials,
            transcript: super::Transcript::new(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_complete() {
        let creds = SessionCredentials::new("sk-reason", "sk-explain");
        assert!(creds.is_complete());
    }

    #[test]
    fn test_credentials_missing_or_blank() {
        assert!(!SessionCredentials::default().is_complete());

        let half = SessionCredentials {
            reasoning_api_key: Some("sk-reason".to_string()),
            explainer_api_key: None,
        };
        assert!(!half.is_complete());

        let blank = SessionCredentials {
            reasoning_api_key: Some("sk-reason".to_string()),
            explainer_api_key: Some("   ".to_string()),
        };
        assert!(!blank.is_complete());
    }

    #[test]
    fn test_new_session_starts_empty() {
        let session = Session::new(SessionCredentials::default());
        assert!(session.transcript.is_empty());
    }
}
