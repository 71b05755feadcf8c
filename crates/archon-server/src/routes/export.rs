//! Export Routes - Explanation download
//!
//! Serves the latest explanation as a Markdown attachment, text verbatim.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use uuid::Uuid;

use crate::routes::error_response;
use crate::AppState;

/// Default filename for the downloaded explanation
pub const EXPORT_FILENAME: &str = "architecture_explanation.md";

/// Download the latest assistant explanation as Markdown
#[utoipa::path(
    get,
    path = "/archon/sessions/{id}/export",
    params(("id" = Uuid, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Markdown attachment with the latest explanation"),
        (status = 404, description = "Session not found or no explanation yet")
    ),
    tag = "Export"
)]
pub async fn export_explanation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, (StatusCode, String)> {
    let transcript = state
        .advisor
        .store()
        .transcript(id)
        .await
        .map_err(error_response)?;

    let explanation = transcript.last_assistant_text().ok_or((
        StatusCode::NOT_FOUND,
        "no explanation available for this session yet".to_string(),
    ))?;

    Ok((
        [
            (
                header::CONTENT_TYPE,
                "text/markdown; charset=utf-8".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILENAME}\""),
            ),
        ],
        explanation.to_string(),
    )
        .into_response())
}

pub fn router() -> Router<AppState> {
    Router::new().route("/archon/sessions/:id/export", get(export_explanation))
}
