//! Coverage grading and recommendations.
//!
//! Classifies how broad (source count) and deep (finding/insight richness)
//! a research pass was, and emits independent, conditionally-appended
//! recommendations for the next pass.

use crate::types::{AgentResult, CoverageAnalysis, CoverageTier};

// Breadth tiers by total declared source count.
const BREADTH_EXCELLENT: usize = 30;
const BREADTH_GOOD: usize = 15;
const BREADTH_LIMITED_BELOW: usize = 5;

// Depth tiers by finding/insight counts.
const DEPTH_EXCELLENT_FINDINGS: usize = 10;
const DEPTH_EXCELLENT_INSIGHTS: usize = 5;
const DEPTH_GOOD_FINDINGS: usize = 5;
const DEPTH_GOOD_INSIGHTS: usize = 3;
const DEPTH_LIMITED_FINDINGS_BELOW: usize = 3;

// Recommendation triggers.
const RECOMMEND_SOURCES_BELOW: usize = 10;
const RECOMMEND_INSIGHTS_BELOW: usize = 3;

/// Grade breadth and depth into tiers and collect recommendations.
pub fn analyze_coverage(results: &[AgentResult]) -> CoverageAnalysis {
    let total_sources: usize = results.iter().map(|r| r.source_total()).sum();
    let total_findings: usize = results.iter().map(|r| r.findings.len()).sum();
    let total_insights: usize = results.iter().map(|r| r.insights.len()).sum();

    let breadth = if total_sources >= BREADTH_EXCELLENT {
        CoverageTier::Excellent
    } else if total_sources >= BREADTH_GOOD {
        CoverageTier::Good
    } else if total_sources < BREADTH_LIMITED_BELOW {
        CoverageTier::Limited
    } else {
        CoverageTier::Medium
    };

    let depth = if total_findings >= DEPTH_EXCELLENT_FINDINGS && total_insights >= DEPTH_EXCELLENT_INSIGHTS {
        CoverageTier::Excellent
    } else if total_findings >= DEPTH_GOOD_FINDINGS && total_insights >= DEPTH_GOOD_INSIGHTS {
        CoverageTier::Good
    } else if total_findings < DEPTH_LIMITED_FINDINGS_BELOW {
        CoverageTier::Limited
    } else {
        CoverageTier::Medium
    };

    // Distinct successful agent names, first-seen order for determinism.
    let mut source_types: Vec<String> = Vec::new();
    for result in results.iter().filter(|r| r.is_success()) {
        if !source_types.contains(&result.agent_name) {
            source_types.push(result.agent_name.clone());
        }
    }

    // Checks are independent and appended in this fixed order.
    let mut recommendations = Vec::new();
    if source_types.len() == 1 {
        recommendations
            .push("Consider using multiple agents for broader perspective".to_string());
    }
    if total_sources < RECOMMEND_SOURCES_BELOW {
        recommendations
            .push("Increase source count for more comprehensive analysis".to_string());
    }
    if total_insights < RECOMMEND_INSIGHTS_BELOW {
        recommendations
            .push("Refine query to generate more actionable insights".to_string());
    }

    CoverageAnalysis {
        breadth,
        depth,
        source_types,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn agent(name: &str, sources: usize, findings: usize, insights: usize) -> AgentResult {
        let mut result = AgentResult::success(name);
        result.source_count = Some(sources);
        result.findings = (0..findings).map(|i| format!("finding {i}")).collect();
        result.insights = (0..insights).map(|i| format!("insight {i}")).collect();
        result
    }

    #[test]
    fn test_rich_pass_grades_excellent_with_no_recommendations() {
        let results = vec![
            agent("search", 15, 5, 2),
            agent("video", 10, 4, 2),
            agent("scholar", 10, 3, 2),
        ];
        let coverage = analyze_coverage(&results);

        assert_eq!(coverage.breadth, CoverageTier::Excellent);
        assert_eq!(coverage.depth, CoverageTier::Excellent);
        assert_eq!(coverage.source_types, vec!["search", "video", "scholar"]);
        assert!(coverage.recommendations.is_empty());
    }

    #[rstest]
    #[case(35, CoverageTier::Excellent)]
    #[case(30, CoverageTier::Excellent)]
    #[case(20, CoverageTier::Good)]
    #[case(15, CoverageTier::Good)]
    #[case(10, CoverageTier::Medium)]
    #[case(5, CoverageTier::Medium)]
    #[case(4, CoverageTier::Limited)]
    #[case(0, CoverageTier::Limited)]
    fn test_breadth_tiers(#[case] sources: usize, #[case] expected: CoverageTier) {
        let coverage = analyze_coverage(&[agent("search", sources, 0, 0)]);
        assert_eq!(coverage.breadth, expected);
    }

    #[rstest]
    #[case(12, 6, CoverageTier::Excellent)]
    #[case(7, 4, CoverageTier::Good)]
    #[case(2, 9, CoverageTier::Limited)]
    #[case(4, 1, CoverageTier::Medium)]
    fn test_depth_tiers(#[case] findings: usize, #[case] insights: usize, #[case] expected: CoverageTier) {
        let coverage = analyze_coverage(&[agent("search", 0, findings, insights)]);
        assert_eq!(coverage.depth, expected);
    }

    #[test]
    fn test_single_source_type_triggers_all_three_recommendations() {
        let coverage = analyze_coverage(&[agent("search", 2, 1, 0)]);
        assert_eq!(coverage.recommendations.len(), 3);
        assert!(coverage.recommendations[0].contains("multiple agents"));
        assert!(coverage.recommendations[1].contains("source count"));
        assert!(coverage.recommendations[2].contains("Refine query"));
    }

    #[test]
    fn test_failed_agents_do_not_appear_in_source_types() {
        let mut failed = agent("video", 20, 0, 0);
        failed.status = crate::types::AgentStatus::Failed;
        let coverage = analyze_coverage(&[agent("search", 5, 0, 0), failed]);
        assert_eq!(coverage.source_types, vec!["search"]);
    }
}
