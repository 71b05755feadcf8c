//! Exchange Entity
//!
//! The ephemeral result of one full chain invocation. Not retained beyond
//! being rendered into the transcript and the response.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ArchitectureAnalysis;

/// Output of one successful two-stage chain run
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChainOutcome {
    /// Raw first-choice text of the reasoning stage, exactly as returned
    pub analysis_raw: String,
    /// The validated structure behind `analysis_raw`
    pub analysis: ArchitectureAnalysis,
    /// Natural-language narration from the explainer stage
    pub explanation: String,
}
