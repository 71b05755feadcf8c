//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use archon::{ArchitectureAnalysis, ComponentSpec, DataStoreSpec, Role, TranscriptEntry};

use crate::models::{
    ChatRequest, ChatResponse, CreateSessionRequest, SessionResponse, TranscriptResponse,
    UpdateCredentialsRequest,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Session endpoints
        super::session::create_session,
        super::session::update_credentials,
        super::session::get_transcript,
        super::session::clear_transcript,
        super::session::remove_session,
        // Chat endpoints
        super::chat::chat,
        // Export endpoints
        super::export::export_explanation,
    ),
    info(
        title = "Archon API",
        version = "0.1.0",
        description = "AI System Architect Advisor\n\nA two-stage model chain: a reasoning model produces a structured architectural analysis, an explainer model narrates it.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Session", description = "Session lifecycle, credentials, transcript"),
        (name = "Chat", description = "Two-stage model chain interaction"),
        (name = "Export", description = "Explanation download"),
    ),
    components(
        schemas(
            // Session
            CreateSessionRequest,
            UpdateCredentialsRequest,
            SessionResponse,
            TranscriptResponse,
            Role,
            TranscriptEntry,
            // Chat
            ChatRequest,
            ChatResponse,
            ArchitectureAnalysis,
            ComponentSpec,
            DataStoreSpec,
        )
    ),
)]
pub struct ApiDoc;
