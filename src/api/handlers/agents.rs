use axum::{extract::State, Json};

use crate::types::AgentInfo;
use crate::AppState;

/// List registered agents and their availability.
#[utoipa::path(
    get,
    path = "/api/agents",
    responses(
        (status = 200, description = "Registered agents", body = [AgentInfo])
    ),
    tag = "agents"
)]
pub async fn list_agents(State(state): State<AppState>) -> Json<Vec<AgentInfo>> {
    Json(state.registry.infos())
}
