//! Agent registry.
//!
//! Holds the configured agents in a fixed order; registration order is the
//! fan-out order, which in turn fixes dedup precedence downstream.

use std::sync::Arc;

use crate::agents::{MockAgent, ResearchAgent, ScholarAgent, SearchAgent, VideoAgent};
use crate::types::AgentInfo;
use crate::utils::config::AgentsConfig;

/// Ordered collection of registered research agents.
#[derive(Default)]
pub struct AgentRegistry {
    agents: Vec<Arc<dyn ResearchAgent>>,
}

impl AgentRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self { agents: Vec::new() }
    }

    /// Build the HTTP-backed agents enabled in configuration, resolving
    /// API keys from the environment.
    pub fn from_config(config: &AgentsConfig) -> Self {
        let mut registry = Self::new();
        if config.search.enabled {
            registry.register(Arc::new(SearchAgent::from_env(&config.search)));
        }
        if config.video.enabled {
            registry.register(Arc::new(VideoAgent::from_env(&config.video)));
        }
        if config.scholar.enabled {
            registry.register(Arc::new(ScholarAgent::from_env(&config.scholar)));
        }
        registry
    }

    /// Registry of deterministic offline mocks, one per real agent.
    pub fn mock() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(MockAgent::search()));
        registry.register(Arc::new(MockAgent::video()));
        registry.register(Arc::new(MockAgent::scholar()));
        registry
    }

    /// Append an agent; duplicate names replace the earlier registration.
    pub fn register(&mut self, agent: Arc<dyn ResearchAgent>) {
        self.agents.retain(|existing| existing.name() != agent.name());
        self.agents.push(agent);
    }

    /// Look an agent up by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn ResearchAgent>> {
        self.agents
            .iter()
            .find(|agent| agent.name() == name)
            .cloned()
    }

    /// Whether an agent with this name is registered.
    pub fn has_agent(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Registered agent names, in registration order.
    pub fn agent_names(&self) -> Vec<String> {
        self.agents.iter().map(|a| a.name().to_string()).collect()
    }

    /// All registered agents, in registration order.
    pub fn agents(&self) -> &[Arc<dyn ResearchAgent>] {
        &self.agents
    }

    /// Listing rows for the API.
    pub fn infos(&self) -> Vec<AgentInfo> {
        self.agents
            .iter()
            .map(|agent| AgentInfo {
                name: agent.name().to_string(),
                description: agent.description().to_string(),
                available: agent.available(),
            })
            .collect()
    }

    /// Number of registered agents.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether the registry holds no agents.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}
