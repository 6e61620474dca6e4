//! Request handlers.

/// Agent listing.
pub mod agents;
/// History listing, retrieval, and export.
pub mod history;
/// Research execution.
pub mod research;

use axum::Json;

/// Liveness probe.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
