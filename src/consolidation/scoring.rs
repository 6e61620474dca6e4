//! Multi-factor confidence scoring.
//!
//! The score is a heuristic summary of result trustworthiness, not a
//! statistical confidence interval. Four independently-capped factors sum
//! to at most 30 + 30 + 20 + 20 = 100, so no outer clamp is needed.

use crate::types::AgentResult;

const SUCCESS_RATE_WEIGHT: f64 = 30.0;
const SOURCE_DIVERSITY_WEIGHT: f64 = 30.0;
const FINDING_CONSISTENCY_WEIGHT: f64 = 20.0;
const INSIGHT_DEPTH_WEIGHT: f64 = 20.0;

// Counts at which each factor saturates.
const SOURCE_SATURATION: f64 = 10.0;
const FINDING_SATURATION: f64 = 20.0;
const INSIGHT_SATURATION: f64 = 10.0;

/// Compute the confidence score in [0, 100], rounded to one decimal.
///
/// Returns 0.0 for empty input. Failed agents count toward the success-rate
/// denominator; source/finding/insight counts are taken over every record.
pub fn confidence_score(results: &[AgentResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }

    let successful = results.iter().filter(|r| r.is_success()).count();
    let success_rate = (successful as f64 / results.len() as f64) * SUCCESS_RATE_WEIGHT;

    let total_sources: usize = results.iter().map(|r| r.source_total()).sum();
    let source_diversity = (total_sources as f64 / SOURCE_SATURATION).min(1.0) * SOURCE_DIVERSITY_WEIGHT;

    let total_findings: usize = results.iter().map(|r| r.findings.len()).sum();
    let finding_consistency =
        (total_findings as f64 / FINDING_SATURATION).min(1.0) * FINDING_CONSISTENCY_WEIGHT;

    let total_insights: usize = results.iter().map(|r| r.insights.len()).sum();
    let insight_depth = (total_insights as f64 / INSIGHT_SATURATION).min(1.0) * INSIGHT_DEPTH_WEIGHT;

    let total = success_rate + source_diversity + finding_consistency + insight_depth;
    (total * 10.0).round() / 10.0
}
