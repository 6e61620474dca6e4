use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::export;
use crate::types::{AppError, HistoryEntry, HistorySummary, Result};
use crate::AppState;

/// List stored reports, most recent first.
#[utoipa::path(
    get,
    path = "/api/history",
    responses(
        (status = 200, description = "Stored reports", body = [HistorySummary])
    ),
    tag = "history"
)]
pub async fn list_history(State(state): State<AppState>) -> Json<Vec<HistorySummary>> {
    Json(state.history.summaries())
}

/// Fetch one stored report.
#[utoipa::path(
    get,
    path = "/api/history/{id}",
    params(("id" = Uuid, Path, description = "History entry id")),
    responses(
        (status = 200, description = "Stored report", body = HistoryEntry),
        (status = 404, description = "Unknown id")
    ),
    tag = "history"
)]
pub async fn get_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<HistoryEntry>> {
    state
        .history
        .get(id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No history entry {id}")))
}

/// Clear the research history.
#[utoipa::path(
    delete,
    path = "/api/history",
    responses(
        (status = 204, description = "History cleared")
    ),
    tag = "history"
)]
pub async fn clear_history(State(state): State<AppState>) -> axum::http::StatusCode {
    state.history.clear();
    axum::http::StatusCode::NO_CONTENT
}

/// Export format selector.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ExportParams {
    /// "json" (default) or "markdown".
    pub format: Option<String>,
}

/// Export a stored report as JSON or Markdown.
#[utoipa::path(
    get,
    path = "/api/history/{id}/export",
    params(
        ("id" = Uuid, Path, description = "History entry id"),
        ExportParams
    ),
    responses(
        (status = 200, description = "Rendered report"),
        (status = 400, description = "Unknown format"),
        (status = 404, description = "Unknown id")
    ),
    tag = "history"
)]
pub async fn export_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<ExportParams>,
) -> Result<Response> {
    let entry = state
        .history
        .get(id)
        .ok_or_else(|| AppError::NotFound(format!("No history entry {id}")))?;

    match params.format.as_deref().unwrap_or("json") {
        "json" => Ok((
            [(header::CONTENT_TYPE, "application/json")],
            export::to_json(&entry)?,
        )
            .into_response()),
        "markdown" | "md" => Ok((
            [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
            export::to_markdown(&entry),
        )
            .into_response()),
        other => Err(AppError::InvalidInput(format!(
            "Unknown export format '{other}'; use json or markdown"
        ))),
    }
}
