//! Advisor Service (Use Case)
//!
//! Orchestrates one chat interaction: credential precondition, the
//! two-stage chain, and the transcript bookkeeping. Generic over a chain
//! factory so tests can swap the remote endpoints for stubs.

use std::sync::Arc;

use uuid::Uuid;

use archon::{ChainError, ChainOutcome, ChatModel, SessionCredentials};

use super::chain::ModelChain;
use super::openrouter::OpenRouterModel;
use super::session_store::SessionStore;
use crate::config::ServerConfig;

/// Builds a per-session model chain from session credentials.
///
/// The chain is rebuilt per interaction because the credentials belong to
/// the session, not the server.
pub trait ChainFactory: Send + Sync {
    type Reasoner: ChatModel;
    type Explainer: ChatModel;

    fn build(
        &self,
        reasoning_api_key: &str,
        explainer_api_key: &str,
    ) -> ModelChain<Self::Reasoner, Self::Explainer>;
}

/// Production factory: both stages served by OpenRouter
#[derive(Clone)]
pub struct OpenRouterChainFactory {
    client: reqwest::Client,
    base_url: String,
    reasoning_model: String,
    explainer_model: String,
}

impl OpenRouterChainFactory {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            client: OpenRouterModel::build_client(config.request_timeout_secs),
            base_url: config.base_url.clone(),
            reasoning_model: config.reasoning_model.clone(),
            explainer_model: config.explainer_model.clone(),
        }
    }
}

impl ChainFactory for OpenRouterChainFactory {
    type Reasoner = OpenRouterModel;
    type Explainer = OpenRouterModel;

    fn build(
        &self,
        reasoning_api_key: &str,
        explainer_api_key: &str,
    ) -> ModelChain<OpenRouterModel, OpenRouterModel> {
        ModelChain::new(
            OpenRouterModel::new(
                self.client.clone(),
                &self.base_url,
                reasoning_api_key,
                &self.reasoning_model,
            ),
            OpenRouterModel::new(
                self.client.clone(),
                &self.base_url,
                explainer_api_key,
                &self.explainer_model,
            ),
        )
    }
}

/// Application service for chat interactions
pub struct AdvisorService<F: ChainFactory> {
    store: Arc<SessionStore>,
    factory: F,
}

impl<F: ChainFactory> AdvisorService<F> {
    pub fn new(store: Arc<SessionStore>, factory: F) -> Self {
        Self { store, factory }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Run one full interaction for a session.
    ///
    /// Credentials are checked once, before anything else: when either
    /// key is missing no remote call is made and the transcript stays
    /// untouched. On success exactly two entries are appended (the query,
    /// then the explanation); on chain failure the failure is recorded
    /// inline with the error marker and the typed error is returned.
    pub async fn chat(&self, session_id: Uuid, query: &str) -> Result<ChainOutcome, ChainError> {
        let session = self.store.get(session_id).await?;

        let credentials = &session.credentials;
        if !credentials.is_complete() {
            tracing::warn!(%session_id, "chat rejected: model credentials missing");
            return Err(ChainError::MissingCredentials);
        }

        let chain = self.factory.build(
            credentials.reasoning_api_key.as_deref().unwrap_or_default(),
            credentials.explainer_api_key.as_deref().unwrap_or_default(),
        );

        match chain.run(query).await {
            Ok(outcome) => {
                self.store
                    .record_exchange(session_id, query, &outcome.explanation)
                    .await?;
                tracing::info!(%session_id, "chain completed");
                Ok(outcome)
            }
            Err(err) => {
                self.store.record_failure(session_id, query, &err).await?;
                tracing::warn!(%session_id, error = %err, "chain failed");
                Err(err)
            }
        }
    }

    /// Create a session (credentials optional at this point)
    pub async fn create_session(&self, credentials: SessionCredentials) -> archon::Session {
        self.store.create(credentials).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archon::{ChatMessage, CompletionOptions, CompletionResponse, Role, TokenUsage};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Stub endpoint with a canned reply and a call counter
    struct StubModel {
        reply: Result<String, ChainError>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl ChatModel for StubModel {
        async fn complete(
            &self,
            _messages: &[ChatMessage],
            _options: &CompletionOptions,
        ) -> Result<CompletionResponse, ChainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(CompletionResponse {
                content: self.reply.clone()?,
                model: "stub".to_string(),
                usage: TokenUsage::default(),
                finish_reason: None,
            })
        }

        fn provider_name(&self) -> &str {
            "stub"
        }

        fn model_id(&self) -> &str {
            "stub-model"
        }
    }

    struct StubFactory {
        reasoner_reply: Result<String, ChainError>,
        explainer_reply: Result<String, ChainError>,
        calls: Arc<AtomicUsize>,
    }

    impl StubFactory {
        fn new(
            reasoner_reply: Result<String, ChainError>,
            explainer_reply: Result<String, ChainError>,
        ) -> Self {
            Self {
                reasoner_reply,
                explainer_reply,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    impl ChainFactory for StubFactory {
        type Reasoner = StubModel;
        type Explainer = StubModel;

        fn build(&self, _r: &str, _e: &str) -> ModelChain<StubModel, StubModel> {
            ModelChain::new(
                StubModel {
                    reply: self.reasoner_reply.clone(),
                    calls: Arc::clone(&self.calls),
                },
                StubModel {
                    reply: self.explainer_reply.clone(),
                    calls: Arc::clone(&self.calls),
                },
            )
        }
    }

    const ANALYSIS: &str = r#"{"components":["API","DB"]}"#;

    fn advisor(factory: StubFactory) -> AdvisorService<StubFactory> {
        AdvisorService::new(Arc::new(SessionStore::new()), factory)
    }

    #[tokio::test]
    async fn test_missing_credentials_makes_no_call_and_no_entries() {
        let factory = StubFactory::new(Ok(ANALYSIS.to_string()), Ok("expl".to_string()));
        let calls = Arc::clone(&factory.calls);
        let service = advisor(factory);

        let session = service.create_session(SessionCredentials::default()).await;
        let err = service.chat(session.id, "my query").await.unwrap_err();

        assert!(matches!(err, ChainError::MissingCredentials));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(service
            .store()
            .transcript(session.id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_successful_interaction_appends_two_records() {
        let service = advisor(StubFactory::new(
            Ok(ANALYSIS.to_string()),
            Ok("A clean three-tier design.".to_string()),
        ));
        let session = service
            .create_session(SessionCredentials::new("sk-r", "sk-e"))
            .await;

        let outcome = service.chat(session.id, "Design a pastebin").await.unwrap();
        assert_eq!(outcome.explanation, "A clean three-tier design.");

        let transcript = service.store().transcript(session.id).await.unwrap();
        let entries = transcript.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].role, Role::User);
        assert_eq!(entries[0].text, "Design a pastebin");
        assert_eq!(entries[1].role, Role::Assistant);
        assert_eq!(entries[1].text, "A clean three-tier design.");
        // Intermediate reasoning output is not part of the transcript
        assert!(!entries.iter().any(|e| e.text.contains("components")));
    }

    #[tokio::test]
    async fn test_chain_failure_recorded_inline_and_typed() {
        let service = advisor(StubFactory::new(
            Err(ChainError::Authentication("invalid key".to_string())),
            Ok("unused".to_string()),
        ));
        let session = service
            .create_session(SessionCredentials::new("sk-r", "sk-e"))
            .await;

        let err = service.chat(session.id, "q").await.unwrap_err();
        assert!(matches!(err, ChainError::Authentication(_)));

        let transcript = service.store().transcript(session.id).await.unwrap();
        let entries = transcript.entries();
        assert_eq!(entries.len(), 2);
        assert!(entries[1].text.starts_with('❌'));
        assert!(entries[1].text.contains("invalid key"));
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let service = advisor(StubFactory::new(Ok(ANALYSIS.to_string()), Ok("e".to_string())));
        let err = service.chat(Uuid::new_v4(), "q").await.unwrap_err();
        assert!(matches!(err, ChainError::SessionNotFound(_)));
    }
}
