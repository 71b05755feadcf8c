//! OpenRouter Chat Adapter
//!
//! `ChatModel` implementation over OpenRouter's chat-completion API.
//! One instance per chain stage, each with its own bearer token and
//! model id; only the first response choice is consumed.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use archon::{ChainError, ChatMessage, ChatModel, CompletionOptions, CompletionResponse, TokenUsage};

/// Chat-completion endpoint client for one model
#[derive(Clone)]
pub struct OpenRouterModel {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenRouterModel {
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Shared HTTP client with the configured outbound timeout
    pub fn build_client(timeout_secs: u64) -> Client {
        Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(concat!("archon/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default()
    }
}

// ============================================
// Wire Types
// ============================================

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    model: Option<String>,
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<UsageBody>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize, Default)]
struct UsageBody {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}

#[async_trait]
impl ChatModel for OpenRouterModel {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, ChainError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages,
            max_tokens: options.max_tokens,
            temperature: options.temperature,
        };

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| ChainError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            return Err(ChainError::from_status(status.as_u16(), body));
        }

        let payload: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ChainError::MalformedResponse(e.to_string()))?;

        let usage = payload.usage.unwrap_or_default();
        let model = payload.model.unwrap_or_else(|| self.model.clone());

        let first = payload
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ChainError::MalformedResponse("response has no choices".to_string()))?;

        let content = first.message.content.ok_or_else(|| {
            ChainError::MalformedResponse("first choice has no message content".to_string())
        })?;

        Ok(CompletionResponse {
            content,
            model,
            usage: TokenUsage {
                prompt_tokens: usage.prompt_tokens,
                completion_tokens: usage.completion_tokens,
                total_tokens: usage.total_tokens,
            },
            finish_reason: first.finish_reason,
        })
    }

    fn provider_name(&self) -> &str {
        "openrouter"
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_shape() {
        let messages = vec![
            ChatMessage::system("be terse"),
            ChatMessage::user("design a queue"),
        ];
        let request = ChatCompletionRequest {
            model: "deepseek/deepseek-r1-0528:free",
            messages: &messages,
            max_tokens: Some(3000),
            temperature: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "deepseek/deepseek-r1-0528:free");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "design a queue");
        assert_eq!(json["max_tokens"], 3000);
        // Unset sampling options stay off the wire
        assert!(json.get("temperature").is_none());
    }

    #[test]
    fn test_response_first_choice_decoding() {
        let body = r#"{
            "id": "gen-1",
            "model": "deepseek/deepseek-r1-0528:free",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "{\"components\":[\"API\"]}"}, "finish_reason": "stop"},
                {"index": 1, "message": {"role": "assistant", "content": "ignored"}}
            ],
            "usage": {"prompt_tokens": 12, "completion_tokens": 7, "total_tokens": 19}
        }"#;

        let decoded: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        let first = decoded.choices.into_iter().next().unwrap();
        assert_eq!(
            first.message.content.as_deref(),
            Some("{\"components\":[\"API\"]}")
        );
        assert_eq!(first.finish_reason.as_deref(), Some("stop"));
        assert_eq!(decoded.usage.unwrap().total_tokens, 19);
    }

    #[test]
    fn test_response_tolerates_missing_usage() {
        let body = r#"{"choices":[{"message":{"content":"hello"}}]}"#;
        let decoded: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        assert!(decoded.usage.is_none());
        assert!(decoded.model.is_none());
    }

    #[test]
    fn test_model_identity() {
        let model = OpenRouterModel::new(
            Client::new(),
            "https://openrouter.ai/api/v1/",
            "sk-test",
            "mistralai/devstral-small:free",
        );
        assert_eq!(model.provider_name(), "openrouter");
        assert_eq!(model.model_id(), "mistralai/devstral-small:free");
        // Trailing slash on the base URL is normalized away
        assert_eq!(model.base_url, "https://openrouter.ai/api/v1");
    }
}
