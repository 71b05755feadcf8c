//! Server Configuration
//!
//! Environment-based configuration (with `.env` support via dotenvy).
//! Model credentials are deliberately absent here: those arrive per
//! session through the API and live only in memory.

use anyhow::{Context, Result};
use std::net::SocketAddr;

/// Default completion endpoint for both chain stages
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
/// Default reasoning-stage model
pub const DEFAULT_REASONING_MODEL: &str = "deepseek/deepseek-r1-0528:free";
/// Default explainer-stage model
pub const DEFAULT_EXPLAINER_MODEL: &str = "mistralai/devstral-small:free";

/// Runtime configuration for the API server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address to bind
    pub bind_addr: SocketAddr,
    /// Optional bearer token protecting the API; auth is disabled when unset
    pub api_key: Option<String>,
    /// Chat-completion base URL (overridable for stub endpoints)
    pub base_url: String,
    /// Model id for the reasoning stage
    pub reasoning_model: String,
    /// Model id for the explainer stage
    pub explainer_model: String,
    /// Outbound request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            reasoning_model: DEFAULT_REASONING_MODEL.to_string(),
            explainer_model: DEFAULT_EXPLAINER_MODEL.to_string(),
            request_timeout_secs: 120,
        }
    }
}

impl ServerConfig {
    /// Load configuration from the environment (`ARCHON_*` variables)
    pub fn from_env() -> Result<Self> {
        // Missing .env is fine; real environments configure directly
        let _ = dotenvy::dotenv();

        let defaults = Self::default();

        let bind_addr = match std::env::var("ARCHON_BIND_ADDR") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("invalid ARCHON_BIND_ADDR: {raw}"))?,
            Err(_) => defaults.bind_addr,
        };

        let request_timeout_secs = match std::env::var("ARCHON_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("invalid ARCHON_REQUEST_TIMEOUT_SECS: {raw}"))?,
            Err(_) => defaults.request_timeout_secs,
        };

        Ok(Self {
            bind_addr,
            api_key: std::env::var("ARCHON_API_KEY").ok().filter(|k| !k.is_empty()),
            base_url: std::env::var("ARCHON_BASE_URL").unwrap_or(defaults.base_url),
            reasoning_model: std::env::var("ARCHON_REASONING_MODEL")
                .unwrap_or(defaults.reasoning_model),
            explainer_model: std::env::var("ARCHON_EXPLAINER_MODEL")
                .unwrap_or(defaults.explainer_model),
            request_timeout_secs,
        })
    }
}
