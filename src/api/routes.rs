use axum::{
    routing::{get, post},
    Router,
};

use crate::api::handlers;
use crate::AppState;

/// Build the API router. Tracing/CORS layers and state are attached by the
/// caller.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/openapi.json", get(crate::api::openapi_spec))
        .route("/api/research", post(handlers::research::run_research))
        .route("/api/agents", get(handlers::agents::list_agents))
        .route(
            "/api/history",
            get(handlers::history::list_history).delete(handlers::history::clear_history),
        )
        .route("/api/history/{id}", get(handlers::history::get_history))
        .route(
            "/api/history/{id}/export",
            get(handlers::history::export_history),
        )
}
