//! Single entry point tying the synthesis steps together.

use chrono::Utc;

use crate::consolidation::contradictions::detect_contradictions;
use crate::consolidation::coverage::analyze_coverage;
use crate::consolidation::scoring::confidence_score;
use crate::consolidation::synthesis::{
    synthesize_findings, synthesize_insights, synthesize_summary,
};
use crate::types::{AgentResult, ConsolidatedResult, Domain};

/// Consolidates heterogeneous, partially-failed agent outputs into one
/// coherent report.
///
/// Stateless between calls: every invocation is a pure function of its
/// inputs (plus the report timestamp). A server handling concurrent
/// requests gives each request its own `consolidate` call; there is no
/// shared cache and no global counter to race on.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultConsolidator;

impl ResultConsolidator {
    /// Create a consolidator.
    pub fn new() -> Self {
        Self
    }

    /// Run the full consolidation pass.
    ///
    /// Total by design: any input, including an empty or all-failed agent
    /// list, yields a valid report. A partial or empty report beats no
    /// report in an interactive research tool.
    pub fn consolidate(
        &self,
        query: &str,
        domain: Domain,
        agent_results: &[AgentResult],
        execution_time: f64,
    ) -> ConsolidatedResult {
        let mut all_sources = Vec::new();
        let mut total_tokens = 0u64;
        let mut total_cost = 0.0f64;
        let mut successful_agents = Vec::new();

        for result in agent_results.iter().filter(|r| r.is_success()) {
            all_sources.extend(result.sources.iter().cloned());
            total_tokens += result.tokens;
            total_cost += result.cost;
            successful_agents.push(result.agent_name.clone());
        }

        let summary = synthesize_summary(agent_results, query, domain);
        let key_findings = synthesize_findings(agent_results);
        let insights = synthesize_insights(agent_results, domain);
        let contradictions = detect_contradictions(agent_results);
        let confidence = confidence_score(agent_results);
        let coverage_analysis = analyze_coverage(agent_results);

        let synthesis_quality = if successful_agents.len() > 1 {
            "high"
        } else {
            "medium"
        };

        tracing::debug!(
            query,
            domain = %domain,
            agents = agent_results.len(),
            successful = successful_agents.len(),
            findings = key_findings.len(),
            insights = insights.len(),
            contradictions = contradictions.len(),
            confidence,
            "consolidated agent results"
        );

        ConsolidatedResult {
            query: query.to_string(),
            domain,
            summary,
            key_findings,
            insights,
            contradictions,
            confidence_score: confidence,
            coverage_analysis,
            total_sources: all_sources.len(),
            sources: all_sources,
            total_tokens,
            total_cost,
            execution_time,
            successful_agents,
            synthesis_quality: synthesis_quality.to_string(),
            timestamp: Utc::now(),
        }
    }
}
