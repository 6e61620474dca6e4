use std::sync::Arc;
use std::time::Instant;

use tokio::task::JoinSet;

use crate::agents::AgentRegistry;
use crate::consolidation::ResultConsolidator;
use crate::types::{AgentResult, ConsolidatedResult, ResearchRequest, Result};

/// Coordinates one research pass: resolve agents, fan out, gather,
/// consolidate.
pub struct ResearchCoordinator {
    registry: Arc<AgentRegistry>,
    consolidator: ResultConsolidator,
}

impl ResearchCoordinator {
    /// Create a coordinator over the given agent registry.
    pub fn new(registry: Arc<AgentRegistry>) -> Self {
        Self {
            registry,
            consolidator: ResultConsolidator::new(),
        }
    }

    /// Run the full research pass and consolidate the outcome.
    pub async fn execute(&self, request: &ResearchRequest) -> Result<ConsolidatedResult> {
        let start = Instant::now();
        let agent_results = self.gather(request).await?;
        let execution_time = start.elapsed().as_secs_f64();

        Ok(self.consolidator.consolidate(
            &request.query,
            request.domain,
            &agent_results,
            execution_time,
        ))
    }

    /// Fan the request out to every selected agent and gather their
    /// results in spawn order.
    ///
    /// Unknown agent names are skipped with a warning. Task-level errors
    /// are captured as failed records; they never abort the pass.
    pub async fn gather(&self, request: &ResearchRequest) -> Result<Vec<AgentResult>> {
        let selected = match &request.agents {
            Some(names) => {
                let mut selected = Vec::new();
                for name in names {
                    match self.registry.get(name) {
                        Some(agent) => selected.push(agent),
                        None => {
                            tracing::warn!(agent = %name, "unknown agent requested, skipping")
                        }
                    }
                }
                selected
            }
            None => self.registry.agents().to_vec(),
        };

        tracing::info!(
            query = %request.query,
            domain = %request.domain,
            agents = selected.len(),
            "starting research fan-out"
        );

        let mut set = JoinSet::new();
        for (index, agent) in selected.into_iter().enumerate() {
            let name = agent.name().to_string();
            let query = request.query.clone();
            let domain = request.domain;
            let max_sources = request
                .max_sources
                .unwrap_or_else(|| agent.default_max_sources());

            set.spawn(async move {
                let outcome = agent.research(&query, domain, max_sources).await;
                (index, name, outcome)
            });
        }

        // Slots keyed by spawn index: completion order is nondeterministic,
        // but downstream dedup precedence depends on agent order.
        let mut slots: Vec<Option<AgentResult>> = vec![None; set.len()];
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((index, _, Ok(result))) => {
                    slots[index] = Some(result);
                }
                Ok((index, name, Err(error))) => {
                    tracing::warn!(agent = %name, %error, "agent task failed");
                    slots[index] = Some(AgentResult::failure(name, error.to_string()));
                }
                Err(join_error) => {
                    tracing::error!(%join_error, "agent task panicked or was aborted");
                }
            }
        }

        Ok(slots.into_iter().flatten().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::ResearchAgent;
    use crate::types::{AppError, Domain};
    use async_trait::async_trait;
    use std::time::Duration;

    /// Test double with a controllable delay and outcome.
    struct StubAgent {
        name: &'static str,
        delay_ms: u64,
        fail: bool,
    }

    #[async_trait]
    impl ResearchAgent for StubAgent {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "stub"
        }

        async fn research(
            &self,
            _query: &str,
            _domain: Domain,
            _max_sources: usize,
        ) -> Result<AgentResult> {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
            if self.fail {
                Err(AppError::Agent(format!("{} exploded", self.name)))
            } else {
                Ok(AgentResult::success(self.name))
            }
        }
    }

    fn registry(agents: Vec<StubAgent>) -> Arc<AgentRegistry> {
        let mut registry = AgentRegistry::new();
        for agent in agents {
            registry.register(Arc::new(agent));
        }
        Arc::new(registry)
    }

    fn request() -> ResearchRequest {
        ResearchRequest {
            query: "q".to_string(),
            domain: Domain::General,
            agents: None,
            max_sources: None,
        }
    }

    #[tokio::test]
    async fn test_gather_preserves_spawn_order() {
        // The slowest agent is spawned first; its slot must stay first.
        let coordinator = ResearchCoordinator::new(registry(vec![
            StubAgent { name: "slow", delay_ms: 50, fail: false },
            StubAgent { name: "fast", delay_ms: 0, fail: false },
        ]));

        let results = coordinator.gather(&request()).await.unwrap();
        let names: Vec<&str> = results.iter().map(|r| r.agent_name.as_str()).collect();
        assert_eq!(names, vec!["slow", "fast"]);
    }

    #[tokio::test]
    async fn test_failed_agent_is_captured_not_propagated() {
        let coordinator = ResearchCoordinator::new(registry(vec![
            StubAgent { name: "ok", delay_ms: 0, fail: false },
            StubAgent { name: "bad", delay_ms: 0, fail: true },
        ]));

        let results = coordinator.gather(&request()).await.unwrap();
        assert_eq!(results.len(), 2);
        assert!(results[0].is_success());
        assert!(!results[1].is_success());
        assert!(results[1].error.as_deref().unwrap().contains("exploded"));
    }

    #[tokio::test]
    async fn test_unknown_requested_agents_are_skipped() {
        let coordinator = ResearchCoordinator::new(registry(vec![StubAgent {
            name: "ok",
            delay_ms: 0,
            fail: false,
        }]));

        let mut req = request();
        req.agents = Some(vec!["ok".to_string(), "ghost".to_string()]);
        let results = coordinator.gather(&req).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].agent_name, "ok");
    }

    #[tokio::test]
    async fn test_execute_consolidates_even_with_no_agents() {
        let coordinator = ResearchCoordinator::new(Arc::new(AgentRegistry::new()));
        let report = coordinator.execute(&request()).await.unwrap();
        assert_eq!(report.confidence_score, 0.0);
        assert!(!report.summary.is_empty());
    }

    #[tokio::test]
    async fn test_execute_with_mock_registry_produces_full_report() {
        let coordinator = ResearchCoordinator::new(Arc::new(AgentRegistry::mock()));
        let mut req = request();
        req.query = "battery storage economics".to_string();
        req.max_sources = Some(4);

        let report = coordinator.execute(&req).await.unwrap();
        assert_eq!(report.successful_agents, vec!["search", "video", "scholar"]);
        assert!(report.confidence_score > 0.0);
        assert_eq!(report.total_sources, 12);
        assert!(!report.key_findings.is_empty());
        assert_eq!(report.synthesis_quality, "high");
    }
}
