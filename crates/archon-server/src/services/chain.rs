//! Model Chain Orchestrator
//!
//! Sequences the two remote chat-completion calls: a reasoning model
//! produces a structured architectural analysis, then an explainer model
//! narrates it. Strictly sequential; the explanation stage never starts
//! unless the analysis stage succeeded, validation included. No retries,
//! no caching, no parallelism.

use archon::{
    ArchitectureAnalysis, ChainError, ChainOutcome, ChainStage, ChatMessage, ChatModel,
    CompletionOptions,
};

/// System instruction for the reasoning stage
const REASONING_SYSTEM_PROMPT: &str = "You are a software architecture expert. \
    Reply ONLY with a JSON object containing: summary (string), components (array), \
    data_stores (array), scaling_notes (array of strings), risks (array of strings).";

/// System instruction for the explainer stage
const EXPLAINER_SYSTEM_PROMPT: &str =
    "You are a software architect. Explain the architecture based on the JSON analysis provided.";

const REASONING_MAX_TOKENS: u32 = 3000;
const EXPLANATION_MAX_TOKENS: u32 = 1500;

/// User content for the explainer stage. Both values are forwarded
/// verbatim; the label matches the default reasoning model.
fn explain_user_content(query: &str, prior_output: &str) -> String {
    format!("User Query: {query}\nDeepSeek Output:\n{prior_output}")
}

/// Two-stage model chain over a pair of chat endpoints
pub struct ModelChain<R: ChatModel, E: ChatModel> {
    reasoner: R,
    explainer: E,
}

impl<R: ChatModel, E: ChatModel> ModelChain<R, E> {
    pub fn new(reasoner: R, explainer: E) -> Self {
        Self { reasoner, explainer }
    }

    /// Stage 1: obtain and validate a structured analysis for `query`.
    ///
    /// Returns the raw first-choice text exactly as the endpoint produced
    /// it, together with the validated structure behind it.
    pub async fn analyze(
        &self,
        query: &str,
    ) -> Result<(String, ArchitectureAnalysis), ChainError> {
        tracing::debug!(
            stage = %ChainStage::Reasoning,
            model = self.reasoner.model_id(),
            "requesting structured analysis"
        );

        let messages = [
            ChatMessage::system(REASONING_SYSTEM_PROMPT),
            ChatMessage::user(query),
        ];
        let response = self
            .reasoner
            .complete(
                &messages,
                &CompletionOptions::with_max_tokens(REASONING_MAX_TOKENS),
            )
            .await?;

        let analysis = ArchitectureAnalysis::parse(&response.content)?;
        Ok((response.content, analysis))
    }

    /// Stage 2: obtain a natural-language explanation of `prior_output`.
    ///
    /// Query and prior output are forwarded verbatim into the outgoing
    /// payload; no transformation, truncation, or validation is applied.
    pub async fn explain(&self, query: &str, prior_output: &str) -> Result<String, ChainError> {
        tracing::debug!(
            stage = %ChainStage::Explanation,
            model = self.explainer.model_id(),
            "requesting explanation"
        );

        let messages = [
            ChatMessage::system(EXPLAINER_SYSTEM_PROMPT),
            ChatMessage::user(explain_user_content(query, prior_output)),
        ];
        let response = self
            .explainer
            .complete(
                &messages,
                &CompletionOptions::with_max_tokens(EXPLANATION_MAX_TOKENS),
            )
            .await?;

        Ok(response.content)
    }

    /// Run the full chain for one query
    pub async fn run(&self, query: &str) -> Result<ChainOutcome, ChainError> {
        let (analysis_raw, analysis) = self.analyze(query).await?;
        let explanation = self.explain(query, &analysis_raw).await?;

        Ok(ChainOutcome {
            analysis_raw,
            analysis,
            explanation,
        })
    }
}
