//! Chat Routes - Two-stage chain interaction

use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use uuid::Uuid;

use crate::models::{ChatRequest, ChatResponse};
use crate::routes::error_response;
use crate::AppState;

/// Run one full interaction: structured analysis, then explanation.
///
/// On success the session transcript gains exactly two entries (the query
/// and the explanation); the intermediate analysis is returned here but
/// never recorded in the transcript.
#[utoipa::path(
    post,
    path = "/archon/sessions/{id}/chat",
    params(("id" = Uuid, Path, description = "Session ID")),
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Chain completed", body = ChatResponse),
        (status = 400, description = "Model credentials missing"),
        (status = 404, description = "Session not found"),
        (status = 502, description = "Model endpoint failure or invalid analysis")
    ),
    tag = "Chat"
)]
pub async fn chat(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (axum::http::StatusCode, String)> {
    let outcome = state
        .advisor
        .chat(id, &payload.query)
        .await
        .map_err(error_response)?;

    Ok(Json(ChatResponse {
        explanation: outcome.explanation,
        analysis_raw: outcome.analysis_raw,
        analysis: outcome.analysis,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/archon/sessions/:id/chat", post(chat))
}
