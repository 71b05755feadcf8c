//! Session Routes - Lifecycle, credentials, transcript
//!
//! HTTP handlers that delegate to the session store for state.

use axum::{
    extract::{Path, State},
    routing::{delete, post, put},
    Json, Router,
};
use uuid::Uuid;

use archon::SessionCredentials;

use crate::models::{
    CreateSessionRequest, SessionResponse, TranscriptResponse, UpdateCredentialsRequest,
};
use crate::routes::error_response;
use crate::AppState;

/// Create a new session
#[utoipa::path(
    post,
    path = "/archon/sessions",
    request_body = CreateSessionRequest,
    responses(
        (status = 200, description = "Session created", body = SessionResponse),
    ),
    tag = "Session"
)]
pub async fn create_session(
    State(state): State<AppState>,
    Json(payload): Json<CreateSessionRequest>,
) -> Json<SessionResponse> {
    let credentials = SessionCredentials {
        reasoning_api_key: payload.reasoning_api_key,
        explainer_api_key: payload.explainer_api_key,
    };
    let session = state.advisor.create_session(credentials).await;

    tracing::info!(session_id = %session.id, "session created");

    Json(SessionResponse {
        id: session.id,
        credentials_complete: session.credentials.is_complete(),
        created_at: session.created_at,
    })
}

/// Replace a session's model credentials
#[utoipa::path(
    put,
    path = "/archon/sessions/{id}/credentials",
    params(("id" = Uuid, Path, description = "Session ID")),
    request_body = UpdateCredentialsRequest,
    responses(
        (status = 200, description = "Credentials updated", body = SessionResponse),
        (status = 404, description = "Session not found")
    ),
    tag = "Session"
)]
pub async fn update_credentials(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCredentialsRequest>,
) -> Result<Json<SessionResponse>, (axum::http::StatusCode, String)> {
    let credentials =
        SessionCredentials::new(payload.reasoning_api_key, payload.explainer_api_key);

    state
        .advisor
        .store()
        .set_credentials(id, credentials)
        .await
        .map_err(error_response)?;

    let session = state.advisor.store().get(id).await.map_err(error_response)?;

    Ok(Json(SessionResponse {
        id: session.id,
        credentials_complete: session.credentials.is_complete(),
        created_at: session.created_at,
    }))
}

/// Transcript snapshot, oldest first
#[utoipa::path(
    get,
    path = "/archon/sessions/{id}/transcript",
    params(("id" = Uuid, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Transcript entries in order", body = TranscriptResponse),
        (status = 404, description = "Session not found")
    ),
    tag = "Session"
)]
pub async fn get_transcript(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TranscriptResponse>, (axum::http::StatusCode, String)> {
    let transcript = state
        .advisor
        .store()
        .transcript(id)
        .await
        .map_err(error_response)?;

    Ok(Json(TranscriptResponse {
        session_id: id,
        entries: transcript.entries().to_vec(),
    }))
}

/// Clear a session's transcript unconditionally
#[utoipa::path(
    delete,
    path = "/archon/sessions/{id}/transcript",
    params(("id" = Uuid, Path, description = "Session ID")),
    responses(
        (status = 204, description = "Transcript cleared"),
        (status = 404, description = "Session not found")
    ),
    tag = "Session"
)]
pub async fn clear_transcript(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<axum::http::StatusCode, (axum::http::StatusCode, String)> {
    state
        .advisor
        .store()
        .clear_transcript(id)
        .await
        .map_err(error_response)?;

    tracing::info!(session_id = %id, "transcript cleared");
    Ok(axum::http::StatusCode::NO_CONTENT)
}

/// Drop a session entirely
#[utoipa::path(
    delete,
    path = "/archon/sessions/{id}",
    params(("id" = Uuid, Path, description = "Session ID")),
    responses(
        (status = 204, description = "Session removed"),
        (status = 404, description = "Session not found")
    ),
    tag = "Session"
)]
pub async fn remove_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<axum::http::StatusCode, (axum::http::StatusCode, String)> {
    if state.advisor.store().remove(id).await {
        Ok(axum::http::StatusCode::NO_CONTENT)
    } else {
        Err((
            axum::http::StatusCode::NOT_FOUND,
            format!("session not found: {id}"),
        ))
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/archon/sessions", post(create_session))
        .route("/archon/sessions/:id", delete(remove_session))
        .route(
            "/archon/sessions/:id/credentials",
            put(update_credentials),
        )
        .route(
            "/archon/sessions/:id/transcript",
            axum::routing::get(get_transcript).delete(clear_transcript),
        )
}
