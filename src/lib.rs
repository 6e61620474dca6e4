//! # Lumen - Multi-Agent Research Server
//!
//! A single-process research server: it fans a research question out to
//! independent agents (web search with LLM summarization, video platform
//! metadata, academic/news APIs) and consolidates their heterogeneous,
//! partially-failed outputs into one coherent, scored report.
//!
//! ## Overview
//!
//! Lumen can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `lumen-server` binary
//! 2. **As a library** - Import components into your own Rust project
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use lumen::agents::AgentRegistry;
//! use lumen::research::ResearchCoordinator;
//! use lumen::types::{Domain, ResearchRequest};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let coordinator = ResearchCoordinator::new(Arc::new(AgentRegistry::mock()));
//!
//!     let report = coordinator
//!         .execute(&ResearchRequest {
//!             query: "solid-state battery commercialization".to_string(),
//!             domain: Domain::Technology,
//!             agents: None,
//!             max_sources: None,
//!         })
//!         .await?;
//!
//!     println!("{}", report.summary);
//!     for finding in &report.key_findings {
//!         println!("- {finding}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`agents`] - Research agents and their registry
//! - [`api`] - REST API handlers and routes
//! - [`cli`] - Terminal rendering for the one-shot mode
//! - [`consolidation`] - The result consolidation engine
//! - [`export`] - JSON/Markdown report export
//! - [`history`] - Stored report history
//! - [`research`] - Concurrent fan-out coordination
//! - [`types`] - Common types and error handling
//! - [`utils`] - Configuration
//!
//! ## Architecture
//!
//! Agents are thin I/O adapters that each normalize their upstream API's
//! shape into one canonical record. All of the interesting logic lives in
//! [`consolidation`]: text normalization, similarity deduplication,
//! contradiction detection, confidence scoring, and coverage grading. The
//! engine is deterministic for a fixed input and always produces a valid
//! report, even when every agent failed.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

/// Research agents and their registry.
pub mod agents;
/// HTTP API handlers and routes.
pub mod api;
/// Terminal rendering for the one-shot research mode.
pub mod cli;
/// Result consolidation engine.
pub mod consolidation;
/// JSON/Markdown report export.
pub mod export;
/// Stored report history.
pub mod history;
/// Concurrent research fan-out.
pub mod research;
/// Common types (requests, responses, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use agents::{AgentRegistry, ResearchAgent};
pub use consolidation::ResultConsolidator;
pub use history::HistoryStore;
pub use research::ResearchCoordinator;
pub use types::{AppError, ConsolidatedResult, Domain, ResearchRequest, Result};
pub use utils::config::LumenConfig;

use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration.
    pub config: Arc<LumenConfig>,
    /// Registered research agents.
    pub registry: Arc<AgentRegistry>,
    /// Fan-out coordinator over the registry.
    pub coordinator: Arc<ResearchCoordinator>,
    /// Stored report history.
    pub history: Arc<HistoryStore>,
}

impl AppState {
    /// Assemble application state from configuration and a registry.
    pub fn new(config: LumenConfig, registry: AgentRegistry) -> Self {
        let registry = Arc::new(registry);
        let history = match &config.history.path {
            Some(path) => HistoryStore::with_persistence(path.clone(), config.history.max_entries),
            None => HistoryStore::new(config.history.max_entries),
        };

        Self {
            coordinator: Arc::new(ResearchCoordinator::new(registry.clone())),
            registry,
            history: Arc::new(history),
            config: Arc::new(config),
        }
    }
}
