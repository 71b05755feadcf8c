//! API Models
//!
//! Request/response DTOs for the Archon HTTP API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use archon::{ArchitectureAnalysis, TranscriptEntry};

// ============================================
// Session DTOs
// ============================================

/// Create session request; credentials may be supplied now or later
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateSessionRequest {
    pub reasoning_api_key: Option<String>,
    pub explainer_api_key: Option<String>,
}

/// Replace a session's model credentials
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCredentialsRequest {
    pub reasoning_api_key: String,
    pub explainer_api_key: String,
}

/// Session response; the keys themselves are never echoed back
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub id: Uuid,
    /// Whether both model keys are present for this session
    pub credentials_complete: bool,
    pub created_at: DateTime<Utc>,
}

// ============================================
// Chat DTOs
// ============================================

/// One chat interaction request
#[derive(Debug, Deserialize, ToSchema)]
pub struct ChatRequest {
    /// Free-text architecture query, unconstrained
    pub query: String,
}

/// Result of one full chain interaction
#[derive(Debug, Serialize, ToSchema)]
pub struct ChatResponse {
    /// Explainer-stage narration (also appended to the transcript)
    pub explanation: String,
    /// Raw reasoning-stage output, exactly as the model produced it
    pub analysis_raw: String,
    /// Validated structure behind `analysis_raw`
    pub analysis: ArchitectureAnalysis,
}

/// Transcript snapshot, oldest entry first
#[derive(Debug, Serialize, ToSchema)]
pub struct TranscriptResponse {
    pub session_id: Uuid,
    pub entries: Vec<TranscriptEntry>,
}
