//! API endpoint tests over the mock agent registry.

use axum_test::TestServer;
use serde_json::json;

use lumen::agents::AgentRegistry;
use lumen::types::{AgentInfo, HistoryEntry, HistorySummary, ResearchResponse};
use lumen::{api, AppState, LumenConfig};

fn test_server() -> TestServer {
    let state = AppState::new(LumenConfig::default(), AgentRegistry::mock());
    let app = api::routes::create_router().with_state(state);
    TestServer::new(app).expect("failed to start test server")
}

#[tokio::test]
async fn health_reports_ok() {
    let server = test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn research_returns_consolidated_report() {
    let server = test_server();

    let response = server
        .post("/api/research")
        .json(&json!({
            "query": "grid scale battery storage",
            "domain": "technology",
            "max_sources": 4
        }))
        .await;
    response.assert_status_ok();

    let body: ResearchResponse = response.json();
    assert_eq!(body.result.query, "grid scale battery storage");
    assert_eq!(
        body.result.successful_agents,
        vec!["search", "video", "scholar"]
    );
    assert!(body.result.confidence_score > 0.0);
    assert!(!body.result.key_findings.is_empty());
    assert_eq!(body.result.total_sources, 12);
}

#[tokio::test]
async fn research_rejects_empty_query() {
    let server = test_server();
    let response = server
        .post("/api/research")
        .json(&json!({"query": "   "}))
        .await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn research_is_recorded_in_history() {
    let server = test_server();

    let research: ResearchResponse = server
        .post("/api/research")
        .json(&json!({"query": "vaccine efficacy", "domain": "medical"}))
        .await
        .json();

    let listed: Vec<HistorySummary> = server.get("/api/history").await.json();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, research.id);
    assert_eq!(listed[0].query, "vaccine efficacy");

    let entry: HistoryEntry = server
        .get(&format!("/api/history/{}", research.id))
        .await
        .json();
    assert_eq!(entry.result.summary, research.result.summary);
}

#[tokio::test]
async fn unknown_history_id_is_not_found() {
    let server = test_server();
    let response = server
        .get("/api/history/00000000-0000-0000-0000-000000000000")
        .await;
    response.assert_status_not_found();
}

#[tokio::test]
async fn history_can_be_cleared() {
    let server = test_server();
    server
        .post("/api/research")
        .json(&json!({"query": "anything"}))
        .await
        .assert_status_ok();

    server.delete("/api/history").await.assert_status(axum::http::StatusCode::NO_CONTENT);

    let listed: Vec<HistorySummary> = server.get("/api/history").await.json();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn export_renders_markdown_and_json() {
    let server = test_server();
    let research: ResearchResponse = server
        .post("/api/research")
        .json(&json!({"query": "export me", "domain": "stocks"}))
        .await
        .json();

    let markdown = server
        .get(&format!("/api/history/{}/export?format=markdown", research.id))
        .await;
    markdown.assert_status_ok();
    let content_type = markdown.header("content-type");
    assert!(content_type.to_str().unwrap().starts_with("text/markdown"));
    assert!(markdown.text().contains("# Research Report"));

    let json_export = server
        .get(&format!("/api/history/{}/export", research.id))
        .await;
    json_export.assert_status_ok();
    let parsed: HistoryEntry = serde_json::from_str(&json_export.text()).unwrap();
    assert_eq!(parsed.id, research.id);
}

#[tokio::test]
async fn export_rejects_unknown_format() {
    let server = test_server();
    let research: ResearchResponse = server
        .post("/api/research")
        .json(&json!({"query": "export me"}))
        .await
        .json();

    let response = server
        .get(&format!("/api/history/{}/export?format=pdf", research.id))
        .await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn agents_endpoint_lists_registry() {
    let server = test_server();
    let agents: Vec<AgentInfo> = server.get("/api/agents").await.json();
    let names: Vec<&str> = agents.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["search", "video", "scholar"]);
    assert!(agents.iter().all(|a| a.available));
}

#[tokio::test]
async fn research_with_agent_subset_runs_only_those() {
    let server = test_server();
    let body: ResearchResponse = server
        .post("/api/research")
        .json(&json!({
            "query": "subset run",
            "agents": ["scholar", "missing-agent"]
        }))
        .await
        .json();

    assert_eq!(body.result.successful_agents, vec!["scholar"]);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let server = test_server();
    let response = server.get("/api/openapi.json").await;
    response.assert_status_ok();
    let doc: serde_json::Value = response.json();
    assert!(doc["paths"]["/api/research"].is_object());
}
