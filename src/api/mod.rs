//! HTTP API.

/// Request handlers.
pub mod handlers;
/// Router construction.
pub mod routes;

use axum::Json;
use utoipa::OpenApi;

use crate::types;

/// OpenAPI document for the research API.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::research::run_research,
        handlers::agents::list_agents,
        handlers::history::list_history,
        handlers::history::get_history,
        handlers::history::clear_history,
        handlers::history::export_history,
    ),
    components(schemas(
        types::ResearchRequest,
        types::ResearchResponse,
        types::ConsolidatedResult,
        types::CoverageAnalysis,
        types::CoverageTier,
        types::Contradiction,
        types::AgentResult,
        types::AgentStatus,
        types::AgentInfo,
        types::SourceRecord,
        types::HistoryEntry,
        types::HistorySummary,
        types::Domain,
    )),
    tags(
        (name = "research", description = "Run research passes"),
        (name = "agents", description = "Agent registry"),
        (name = "history", description = "Stored reports and export"),
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI document as JSON.
pub async fn openapi_spec() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
