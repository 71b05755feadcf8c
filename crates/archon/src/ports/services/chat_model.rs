//! Chat Model Port
//!
//! Abstract interface for remote chat-completion endpoints. Both chain
//! stages talk through this trait, which is also the seam for stubbed
//! endpoints in tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::errors::ChainError;

/// Role of a message sent to a chat model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// A message in an outgoing chat-completion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Options for one completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionOptions {
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// Temperature (0.0 - 2.0)
    pub temperature: Option<f32>,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            max_tokens: Some(4096),
            temperature: None,
        }
    }
}

impl CompletionOptions {
    pub fn with_max_tokens(max_tokens: u32) -> Self {
        Self {
            max_tokens: Some(max_tokens),
            temperature: None,
        }
    }
}

/// Token usage statistics reported by the endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Response from a chat-completion call.
///
/// `content` is the text of the endpoint's first response choice; other
/// choices are never consulted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub content: String,
    /// Model that generated the response
    pub model: String,
    pub usage: TokenUsage,
    pub finish_reason: Option<String>,
}

/// Remote chat-completion endpoint interface.
///
/// Each concrete endpoint (one per chain stage) gets its own instance,
/// carrying its own credentials and model id.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Issue one blocking completion request. No retries, no caching.
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, ChainError>;

    /// Provider name (e.g. "openrouter")
    fn provider_name(&self) -> &str;

    /// Model ID being used
    fn model_id(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors() {
        let msg = ChatMessage::system("reply with JSON");
        assert_eq!(msg.role, MessageRole::System);
        assert_eq!(msg.content, "reply with JSON");

        assert_eq!(ChatMessage::user("hi").role, MessageRole::User);
        assert_eq!(ChatMessage::assistant("ok").role, MessageRole::Assistant);
    }

    #[test]
    fn test_role_wire_format() {
        let msg = ChatMessage::user("q");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "user");
    }
}
