use std::time::Instant;

use axum::{extract::State, Json};

use crate::types::{AppError, ResearchRequest, ResearchResponse, Result};
use crate::AppState;

/// Run a research pass across the selected agents and store the report.
#[utoipa::path(
    post,
    path = "/api/research",
    request_body = ResearchRequest,
    responses(
        (status = 200, description = "Research completed", body = ResearchResponse),
        (status = 400, description = "Invalid input"),
        (status = 502, description = "Agent transport failure")
    ),
    tag = "research"
)]
pub async fn run_research(
    State(state): State<AppState>,
    Json(payload): Json<ResearchRequest>,
) -> Result<Json<ResearchResponse>> {
    if payload.query.trim().is_empty() {
        return Err(AppError::InvalidInput("query must not be empty".to_string()));
    }

    let start = Instant::now();
    let result = state.coordinator.execute(&payload).await?;
    let entry = state.history.record(result);

    Ok(Json(ResearchResponse {
        id: entry.id,
        result: entry.result,
        duration_ms: start.elapsed().as_millis() as u64,
    }))
}
