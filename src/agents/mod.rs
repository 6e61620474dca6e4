//! Research agents.
//!
//! Each agent is an opaque supplier of one canonical
//! [`AgentResult`](crate::types::AgentResult) per request: it talks to its
//! upstream API, normalizes whatever shape comes back, and never lets a
//! transport failure escape as anything other than an error the
//! coordinator captures into a failed record.

/// Deterministic offline mock agents.
pub mod mock;
/// Ordered agent registry.
pub mod registry;
/// Academic/news agent.
pub mod scholar;
/// Web-search/LLM-summarization agent.
pub mod search;
/// Video-platform metadata agent.
pub mod video;

use crate::types::{AgentResult, Domain, Result};
use async_trait::async_trait;

pub use mock::MockAgent;
pub use registry::AgentRegistry;
pub use scholar::ScholarAgent;
pub use search::SearchAgent;
pub use video::VideoAgent;

/// Base trait for all research agents.
#[async_trait]
pub trait ResearchAgent: Send + Sync {
    /// Registry name, e.g. "search".
    fn name(&self) -> &str;

    /// One-line description of what the agent fetches.
    fn description(&self) -> &str;

    /// Whether the agent can currently run (e.g. its API key is set).
    fn available(&self) -> bool {
        true
    }

    /// Per-request source budget used when the caller does not override it.
    fn default_max_sources(&self) -> usize {
        10
    }

    /// Execute one research pass.
    ///
    /// Agents that cannot run (missing key, upstream rejection with a
    /// usable error body) return an `Ok` failed record so the pass is
    /// still counted; transport errors may surface as `Err` and are
    /// captured by the coordinator.
    async fn research(&self, query: &str, domain: Domain, max_sources: usize)
        -> Result<AgentResult>;
}
