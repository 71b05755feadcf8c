//! Session Store
//!
//! In-memory store of interactive sessions, shared through application
//! state. Every handler receives the session context explicitly from
//! here; there is no ambient session state and nothing touches disk.

use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use archon::{ChainError, Session, SessionCredentials, Transcript};

/// In-memory session registry
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session, optionally seeded with model credentials
    pub async fn create(&self, credentials: SessionCredentials) -> Session {
        let session = Session::new(credentials);
        self.sessions
            .write()
            .await
            .insert(session.id, session.clone());
        session
    }

    /// Snapshot of a session
    pub async fn get(&self, id: Uuid) -> Result<Session, ChainError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(ChainError::SessionNotFound(id))
    }

    /// Replace a session's model credentials
    pub async fn set_credentials(
        &self,
        id: Uuid,
        credentials: SessionCredentials,
    ) -> Result<(), ChainError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(ChainError::SessionNotFound(id))?;
        session.credentials = credentials;
        Ok(())
    }

    /// Append one completed exchange: the user query followed by the
    /// assistant explanation. Both entries land under a single write
    /// lock so the transcript order can never interleave.
    pub async fn record_exchange(
        &self,
        id: Uuid,
        query: &str,
        explanation: &str,
    ) -> Result<(), ChainError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(ChainError::SessionNotFound(id))?;
        session.transcript.push_user(query);
        session.transcript.push_assistant(explanation);
        Ok(())
    }

    /// Append a failed exchange: the user query followed by the marked
    /// error rendering, so failures stay visible inline in the chat.
    pub async fn record_failure(
        &self,
        id: Uuid,
        query: &str,
        error: &ChainError,
    ) -> Result<(), ChainError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(ChainError::SessionNotFound(id))?;
        session.transcript.push_user(query);
        session.transcript.push_assistant(error.user_message());
        Ok(())
    }

    /// Snapshot of a session's transcript
    pub async fn transcript(&self, id: Uuid) -> Result<Transcript, ChainError> {
        Ok(self.get(id).await?.transcript)
    }

    /// Empty a session's transcript, regardless of its contents
    pub async fn clear_transcript(&self, id: Uuid) -> Result<(), ChainError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(ChainError::SessionNotFound(id))?;
        session.transcript.clear();
        Ok(())
    }

    /// Drop a session entirely
    pub async fn remove(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archon::Role;

    #[tokio::test]
    async fn test_create_and_get() {
        let store = SessionStore::new();
        let session = store
            .create(SessionCredentials::new("sk-reason", "sk-explain"))
            .await;

        let fetched = store.get(session.id).await.unwrap();
        assert_eq!(fetched.id, session.id);
        assert!(fetched.credentials.is_complete());
        assert!(fetched.transcript.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_session_is_typed_error() {
        let store = SessionStore::new();
        let id = Uuid::new_v4();
        assert!(matches!(
            store.get(id).await.unwrap_err(),
            ChainError::SessionNotFound(got) if got == id
        ));
    }

    #[tokio::test]
    async fn test_set_credentials_later() {
        let store = SessionStore::new();
        let session = store.create(SessionCredentials::default()).await;
        assert!(!store.get(session.id).await.unwrap().credentials.is_complete());

        store
            .set_credentials(session.id, SessionCredentials::new("a", "b"))
            .await
            .unwrap();
        assert!(store.get(session.id).await.unwrap().credentials.is_complete());
    }

    #[tokio::test]
    async fn test_record_exchange_appends_exactly_two_in_order() {
        let store = SessionStore::new();
        let session = store.create(SessionCredentials::default()).await;

        store
            .record_exchange(session.id, "Design a URL shortener", "Use three tiers.")
            .await
            .unwrap();

        let transcript = store.transcript(session.id).await.unwrap();
        let entries = transcript.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].role, Role::User);
        assert_eq!(entries[0].text, "Design a URL shortener");
        assert_eq!(entries[1].role, Role::Assistant);
        assert_eq!(entries[1].text, "Use three tiers.");
    }

    #[tokio::test]
    async fn test_record_failure_renders_marker_inline() {
        let store = SessionStore::new();
        let session = store.create(SessionCredentials::default()).await;

        let err = ChainError::Transport("dns failure".to_string());
        store.record_failure(session.id, "my query", &err).await.unwrap();

        let transcript = store.transcript(session.id).await.unwrap();
        let entries = transcript.entries();
        assert_eq!(entries.len(), 2);
        assert!(entries[1].text.starts_with('❌'));
        assert!(entries[1].text.contains("dns failure"));
    }

    #[tokio::test]
    async fn test_clear_transcript_unconditional() {
        let store = SessionStore::new();
        let session = store.create(SessionCredentials::default()).await;
        store.record_exchange(session.id, "q", "a").await.unwrap();

        store.clear_transcript(session.id).await.unwrap();
        assert!(store.transcript(session.id).await.unwrap().is_empty());

        // Idempotent on an empty transcript
        store.clear_transcript(session.id).await.unwrap();
        assert!(store.transcript(session.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_session() {
        let store = SessionStore::new();
        let session = store.create(SessionCredentials::default()).await;
        assert!(store.remove(session.id).await);
        assert!(!store.remove(session.id).await);
    }
}
