//! Common types shared across the research pipeline.
//!
//! The agent layer produces one canonical [`AgentResult`] per invoked agent,
//! regardless of which upstream API it talked to. The consolidation engine
//! only ever sees this canonical shape; wire-format quirks of individual
//! agents (`findings` vs `key_findings`, non-string entries, missing
//! `source_count`) are absorbed here during deserialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// ============= Research Domains =============

/// Research domain a query is scoped to.
///
/// Unknown domain strings deserialize to [`Domain::General`] rather than
/// failing the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// Stock market and financial analysis
    Stocks,
    /// Medical and clinical research
    Medical,
    /// Scholarly and academic research
    Academic,
    /// Technology trends and innovation
    Technology,
    /// General-purpose research
    #[default]
    #[serde(other)]
    General,
}

impl Domain {
    /// Canonical lowercase name, as used in serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stocks => "stocks",
            Self::Medical => "medical",
            Self::Academic => "academic",
            Self::Technology => "technology",
            Self::General => "general",
        }
    }

    /// Parse a domain name leniently; anything unrecognized maps to `General`.
    pub fn from_str_loose(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "stocks" | "stock" | "finance" | "financial" => Self::Stocks,
            "medical" | "medicine" | "clinical" | "health" => Self::Medical,
            "academic" | "research" | "scholarly" => Self::Academic,
            "technology" | "tech" => Self::Technology,
            _ => Self::General,
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Domain {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from_str_loose(s))
    }
}

// ============= Agent Result Types =============

/// Outcome of one agent invocation.
///
/// Any status other than an explicit `success` (including the legacy
/// `skipped` emitted by some agents) is treated as `failed`: the record is
/// excluded from synthesis but still counted in the success-rate denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    /// The agent completed and its payload is usable.
    Success,
    /// The agent errored, was skipped, or reported anything but success.
    #[serde(other)]
    Failed,
}

/// Canonical record produced by one research agent.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AgentResult {
    /// Agent identifier, e.g. "search", "video", "scholar".
    pub agent_name: String,
    /// Success marker; failed records are never synthesized from.
    pub status: AgentStatus,
    /// Free-text executive summary; may contain markdown/HTML/citations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Factual claims extracted by the agent. Accepts the `key_findings`
    /// wire name used by older agents; non-string entries are coerced.
    #[serde(default, alias = "key_findings", deserialize_with = "coerced_strings")]
    pub findings: Vec<String>,
    /// Interpretive/strategic claims extracted by the agent.
    #[serde(default, deserialize_with = "coerced_strings")]
    pub insights: Vec<String>,
    /// Sources backing the agent's claims.
    #[serde(default)]
    pub sources: Vec<SourceRecord>,
    /// Declared source count; derived from `sources` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_count: Option<usize>,
    /// Token usage telemetry.
    #[serde(default)]
    pub tokens: u64,
    /// Upstream API cost in dollars.
    #[serde(default)]
    pub cost: f64,
    /// Wall-clock seconds the agent spent.
    #[serde(default)]
    pub execution_time: f64,
    /// Failure detail for non-success records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AgentResult {
    /// Empty successful record for the named agent; callers fill in payloads.
    pub fn success(agent_name: impl Into<String>) -> Self {
        Self {
            agent_name: agent_name.into(),
            status: AgentStatus::Success,
            summary: None,
            findings: Vec::new(),
            insights: Vec::new(),
            sources: Vec::new(),
            source_count: None,
            tokens: 0,
            cost: 0.0,
            execution_time: 0.0,
            error: None,
        }
    }

    /// Record for an agent whose task failed or raised.
    pub fn failure(agent_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            agent_name: agent_name.into(),
            status: AgentStatus::Failed,
            summary: None,
            findings: Vec::new(),
            insights: Vec::new(),
            sources: Vec::new(),
            source_count: None,
            tokens: 0,
            cost: 0.0,
            execution_time: 0.0,
            error: Some(error.into()),
        }
    }

    /// Whether this record may be synthesized from.
    pub fn is_success(&self) -> bool {
        self.status == AgentStatus::Success
    }

    /// Declared source count, falling back to the source list length.
    pub fn source_total(&self) -> usize {
        self.source_count.unwrap_or(self.sources.len())
    }
}

/// Coerce a heterogeneous JSON array into strings.
///
/// Agents occasionally emit numbers or bools where a finding string is
/// expected; those become their JSON rendering. Nulls are dropped.
fn coerced_strings<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|value| match value {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s),
            other => Some(other.to_string()),
        })
        .collect())
}

/// One source a research agent consulted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SourceRecord {
    /// Human-readable source title.
    pub title: String,
    /// Link to the source, when one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Short description; some agents name this `summary` on the wire.
    #[serde(default, alias = "summary", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Provenance tag, e.g. "Web Search", "Video", "Academic".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,
    /// Name of the agent that retrieved this source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
}

// ============= Consolidated Report Types =============

/// A pair of statements from different agents that appear to oppose
/// each other.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Contradiction {
    /// Agent that produced the first statement.
    pub agent1: String,
    /// First statement, truncated for display.
    pub statement1: String,
    /// Agent that produced the second statement.
    pub agent2: String,
    /// Second statement, truncated for display.
    pub statement2: String,
}

/// Qualitative tier used for coverage grading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum CoverageTier {
    /// Exceptional breadth or depth.
    Excellent,
    /// Solid coverage.
    Good,
    /// Acceptable but unremarkable.
    Medium,
    /// Too thin to draw conclusions from.
    Limited,
}

impl CoverageTier {
    /// Lowercase tier name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Medium => "medium",
            Self::Limited => "limited",
        }
    }
}

impl std::fmt::Display for CoverageTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Breadth/depth grading of a research pass.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CoverageAnalysis {
    /// How broad the source base was.
    pub breadth: CoverageTier,
    /// How rich the findings and insights were.
    pub depth: CoverageTier,
    /// Distinct successful agent names, in first-seen order.
    pub source_types: Vec<String>,
    /// Human-readable suggestions for improving the next pass.
    pub recommendations: Vec<String>,
}

/// The single consolidated report produced for one research request.
///
/// Plain data throughout - strings, numbers, and nested records with no
/// cycles - so any recursive serializer terminates. Never mutated after
/// the consolidator returns it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConsolidatedResult {
    /// Echoed research question.
    pub query: String,
    /// Echoed research domain.
    pub domain: Domain,
    /// Synthesized executive summary; never empty.
    pub summary: String,
    /// Deduplicated findings, at most 10.
    pub key_findings: Vec<String>,
    /// Deduplicated insights, at most 8.
    pub insights: Vec<String>,
    /// Detected cross-agent contradictions, at most 5.
    pub contradictions: Vec<Contradiction>,
    /// Heuristic trustworthiness score in [0, 100].
    pub confidence_score: f64,
    /// Breadth/depth grading and recommendations.
    pub coverage_analysis: CoverageAnalysis,
    /// Sources gathered by successful agents, in agent order.
    pub sources: Vec<SourceRecord>,
    /// Count of gathered sources; always equals `sources.len()`.
    pub total_sources: usize,
    /// Token usage summed over successful agents.
    pub total_tokens: u64,
    /// Dollar cost summed over successful agents.
    pub total_cost: f64,
    /// Wall-clock seconds for the whole research pass.
    pub execution_time: f64,
    /// Names of agents that succeeded, in input order.
    pub successful_agents: Vec<String>,
    /// "high" when more than one agent contributed, else "medium".
    pub synthesis_quality: String,
    /// When consolidation ran.
    pub timestamp: DateTime<Utc>,
}

// ============= API Request/Response Types =============

/// Body of `POST /api/research`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResearchRequest {
    /// The research question.
    pub query: String,
    /// Domain to scope prompts and fallbacks to.
    #[serde(default)]
    pub domain: Domain,
    /// Agent names to run; omitted means every enabled agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agents: Option<Vec<String>>,
    /// Per-agent source budget override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_sources: Option<usize>,
}

/// Response of `POST /api/research`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResearchResponse {
    /// History entry id assigned to this report.
    pub id: Uuid,
    /// The consolidated report.
    pub result: ConsolidatedResult,
    /// Server-side handling time in milliseconds.
    pub duration_ms: u64,
}

/// One row of `GET /api/agents`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AgentInfo {
    /// Registry name of the agent.
    pub name: String,
    /// What the agent fetches.
    pub description: String,
    /// Whether the agent is usable (e.g. its API key is configured).
    pub available: bool,
}

// ============= History Types =============

/// A stored research report.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HistoryEntry {
    /// Stable id for retrieval and export.
    pub id: Uuid,
    /// Echoed research question.
    pub query: String,
    /// Echoed research domain.
    pub domain: Domain,
    /// When the report was produced.
    pub timestamp: DateTime<Utc>,
    /// The full consolidated report.
    pub result: ConsolidatedResult,
}

/// Listing row for `GET /api/history`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HistorySummary {
    /// Stable id for retrieval and export.
    pub id: Uuid,
    /// Echoed research question.
    pub query: String,
    /// Echoed research domain.
    pub domain: Domain,
    /// When the report was produced.
    pub timestamp: DateTime<Utc>,
    /// Confidence score of the stored report.
    pub confidence_score: f64,
}

impl From<&HistoryEntry> for HistorySummary {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            id: entry.id,
            query: entry.query.clone(),
            domain: entry.domain,
            timestamp: entry.timestamp,
            confidence_score: entry.result.confidence_score,
        }
    }
}

// ============= Error Types =============

/// Application-level error for everything outside the consolidation engine.
///
/// The consolidation engine itself is total and never produces one of these;
/// errors here are transport, configuration, and lookup failures.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Bad or missing configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An upstream agent API failed.
    #[error("Agent error: {0}")]
    Agent(String),

    /// Requested entity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Caller supplied an invalid request.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Anything else.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::Configuration(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Agent(msg) => (axum::http::StatusCode::BAD_GATEWAY, msg),
            AppError::NotFound(msg) => (axum::http::StatusCode::NOT_FOUND, msg),
            AppError::InvalidInput(msg) => (axum::http::StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, AppError>;
