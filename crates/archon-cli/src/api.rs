//! Archon API Client

use anyhow::{bail, Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// API Client for the Archon server
pub struct ArchonClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

// ============================================
// API Request/Response Types
// ============================================

#[derive(Debug, Serialize)]
pub struct CreateSessionRequest {
    pub reasoning_api_key: Option<String>,
    pub explainer_api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SessionResponse {
    pub id: Uuid,
    pub credentials_complete: bool,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    query: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub explanation: String,
    pub analysis_raw: String,
}

#[derive(Debug, Deserialize)]
pub struct TranscriptEntry {
    pub role: String,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct TranscriptResponse {
    pub entries: Vec<TranscriptEntry>,
}

impl ArchonClient {
    /// Create a new API client
    pub fn new(base_url: &str, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => builder.header("Authorization", format!("Bearer {key}")),
            None => builder,
        }
    }

    /// Test connection with health check
    pub async fn health(&self) -> Result<bool> {
        let url = format!("{}/health", self.base_url);
        let resp = self.client.get(&url).send().await?;
        Ok(resp.status().is_success())
    }

    /// Create a session, optionally seeded with model credentials
    pub async fn create_session(
        &self,
        reasoning_api_key: Option<String>,
        explainer_api_key: Option<String>,
    ) -> Result<SessionResponse> {
        let url = format!("{}/archon/sessions", self.base_url);
        let resp = self
            .request(self.client.post(&url))
            .json(&CreateSessionRequest {
                reasoning_api_key,
                explainer_api_key,
            })
            .send()
            .await
            .context("Failed to reach the Archon server")?;

        if !resp.status().is_success() {
            bail!("Session creation failed: {}", resp.status());
        }
        Ok(resp.json().await?)
    }

    /// Run one chain interaction
    pub async fn chat(&self, session_id: Uuid, query: &str) -> Result<ChatResponse> {
        let url = format!("{}/archon/sessions/{}/chat", self.base_url, session_id);
        let resp = self
            .request(self.client.post(&url))
            .json(&ChatRequest { query })
            .send()
            .await
            .context("Failed to reach the Archon server")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let detail = resp.text().await.unwrap_or_default();
            bail!("Chain failed ({status}): {detail}");
        }
        Ok(resp.json().await?)
    }

    /// Fetch the session transcript
    pub async fn transcript(&self, session_id: Uuid) -> Result<TranscriptResponse> {
        let url = format!("{}/archon/sessions/{}/transcript", self.base_url, session_id);
        let resp = self.request(self.client.get(&url)).send().await?;

        if !resp.status().is_success() {
            bail!("Transcript fetch failed: {}", resp.status());
        }
        Ok(resp.json().await?)
    }

    /// Clear the session transcript
    pub async fn clear_transcript(&self, session_id: Uuid) -> Result<()> {
        let url = format!("{}/archon/sessions/{}/transcript", self.base_url, session_id);
        let resp = self.request(self.client.delete(&url)).send().await?;

        if !resp.status().is_success() {
            bail!("Transcript clear failed: {}", resp.status());
        }
        Ok(())
    }

    /// Download the latest explanation as Markdown text
    pub async fn export(&self, session_id: Uuid) -> Result<String> {
        let url = format!("{}/archon/sessions/{}/export", self.base_url, session_id);
        let resp = self.request(self.client.get(&url)).send().await?;

        if !resp.status().is_success() {
            bail!("Export failed: {}", resp.status());
        }
        Ok(resp.text().await?)
    }
}
