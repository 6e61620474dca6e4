//! End-to-end tests of the consolidation engine against its documented
//! behavior: determinism, cleaning idempotence, dedup, bounds, fallbacks,
//! and the reference scoring/coverage scenarios.

use lumen::consolidation::similarity::{jaccard_similarity, SIMILARITY_THRESHOLD};
use lumen::consolidation::text::{clean_text, normalize_text};
use lumen::consolidation::ResultConsolidator;
use lumen::types::{AgentResult, Domain, SourceRecord};

fn source(title: &str) -> SourceRecord {
    SourceRecord {
        title: title.to_string(),
        url: Some(format!("https://example.com/{title}")),
        description: None,
        source_type: None,
        agent: None,
    }
}

fn agent(name: &str, sources: usize, findings: Vec<String>, insights: Vec<String>) -> AgentResult {
    let mut result = AgentResult::success(name);
    result.source_count = Some(sources);
    result.sources = (0..sources).map(|i| source(&format!("{name}-{i}"))).collect();
    result.findings = findings;
    result.insights = insights;
    result
}

#[test]
fn cleaning_is_idempotent() {
    let samples = [
        "## Heading\n**Revenue** grew *fast* `q3` [1][12]",
        "<p>Paragraph with <b>tags</b></p>",
        "already clean text",
        "",
        "   only   spaces   ",
    ];
    for sample in samples {
        let once = clean_text(sample);
        assert_eq!(clean_text(&once), once);
    }
}

#[test]
fn empty_input_yields_fallback_report() {
    let report = ResultConsolidator::new().consolidate("Q", Domain::Medical, &[], 0.0);

    assert_eq!(report.confidence_score, 0.0);
    assert!(report.key_findings.is_empty());
    assert!(!report.summary.is_empty());
    assert!(report.summary.contains("Q"));
    assert!(report.summary.contains("medical"));
}

#[test]
fn single_successful_agent_scores_forty_six() {
    let mut result = AgentResult::success("search");
    result.source_count = Some(5);
    result.findings = vec!["Finding A long enough to pass the twenty character filter".to_string()];

    let report = ResultConsolidator::new().consolidate("q", Domain::Medical, &[result], 0.0);
    assert_eq!(report.confidence_score, 46.0);
    assert!(!report.insights.is_empty(), "domain fallback must fill insights");
}

#[test]
fn duplicate_findings_across_agents_collapse() {
    let a = agent(
        "search",
        0,
        vec!["Revenue increased 20 percent year over year".to_string()],
        vec![],
    );
    let b = agent(
        "scholar",
        0,
        vec!["Revenue increased twenty percent year over year".to_string()],
        vec![],
    );

    let report = ResultConsolidator::new().consolidate("q", Domain::Stocks, &[a, b], 0.0);
    assert_eq!(report.key_findings.len(), 1);
    assert_eq!(
        report.key_findings[0],
        "Revenue increased 20 percent year over year"
    );
}

#[test]
fn contradiction_detected_between_agents() {
    let a = agent(
        "search",
        0,
        vec![],
        vec!["Market sentiment is bullish on this stock".to_string()],
    );
    let b = agent(
        "scholar",
        0,
        vec![],
        vec!["Analysts remain bearish on this stock".to_string()],
    );

    let report = ResultConsolidator::new().consolidate("q", Domain::Stocks, &[a, b], 0.0);
    assert_eq!(report.contradictions.len(), 1);
    let contradiction = &report.contradictions[0];
    assert_eq!(contradiction.agent1, "search");
    assert_eq!(contradiction.agent2, "scholar");
}

#[test]
fn coverage_scenario_three_rich_agents() {
    // 3 successful agents, 35 sources, 12 findings, 6 insights.
    let findings = |prefix: &str, n: usize| -> Vec<String> {
        (0..n)
            .map(|i| format!("{prefix} produced distinct finding number {i} with several unique words {i}"))
            .collect()
    };
    let insights = |prefix: &str, n: usize| -> Vec<String> {
        (0..n)
            .map(|i| format!("{prefix} produced distinct insight number {i} with several unique words {i}"))
            .collect()
    };
    let results = vec![
        agent("search", 15, findings("alpha", 4), insights("alpha", 2)),
        agent("video", 10, findings("beta", 4), insights("beta", 2)),
        agent("scholar", 10, findings("gamma", 4), insights("gamma", 2)),
    ];

    let report = ResultConsolidator::new().consolidate("q", Domain::General, &results, 0.0);
    let coverage = &report.coverage_analysis;

    assert_eq!(coverage.breadth.as_str(), "excellent");
    assert_eq!(coverage.depth.as_str(), "excellent");
    assert!(coverage.recommendations.is_empty());
    assert_eq!(coverage.source_types, vec!["search", "video", "scholar"]);
}

#[test]
fn output_bounds_always_hold() {
    let mut results = Vec::new();
    for idx in 0..5 {
        results.push(agent(
            &format!("agent{idx}"),
            20,
            (0..12)
                .map(|i| format!("agent {idx} reports that metric {i} is trending up this quarter"))
                .collect(),
            (0..12)
                .map(|i| format!("agent {idx} believes metric {i} is trending down next quarter"))
                .collect(),
        ));
    }

    let report = ResultConsolidator::new().consolidate("q", Domain::General, &results, 0.0);
    assert!(report.key_findings.len() <= 10);
    assert!(report.insights.len() <= 8);
    assert!(report.contradictions.len() <= 5);
    assert!((0.0..=100.0).contains(&report.confidence_score));
}

#[test]
fn no_two_output_findings_are_similar() {
    let results = vec![agent(
        "search",
        0,
        vec![
            "Enterprise adoption of the platform accelerated sharply across regulated industries".to_string(),
            "Enterprise adoption of the platform accelerated sharply across all regulated industries".to_string(),
            "Hiring in the sector slowed noticeably during the second half of the year".to_string(),
            "Capital expenditure guidance was revised upward by most large vendors".to_string(),
        ],
        vec![],
    )];

    let report = ResultConsolidator::new().consolidate("q", Domain::General, &results, 0.0);
    for (i, a) in report.key_findings.iter().enumerate() {
        for b in &report.key_findings[i + 1..] {
            let score = jaccard_similarity(&normalize_text(a), &normalize_text(b));
            assert!(
                score < SIMILARITY_THRESHOLD,
                "output pair too similar ({score}): {a:?} / {b:?}"
            );
        }
    }
}

#[test]
fn consolidation_is_deterministic() {
    let inputs = vec![
        agent(
            "search",
            8,
            vec![
                "Revenue increased 20 percent year over year across the portfolio".to_string(),
                "Unit economics improved on the strength of pricing discipline".to_string(),
            ],
            vec!["Sentiment is broadly bullish among sell-side analysts".to_string()],
        ),
        agent(
            "scholar",
            4,
            vec!["Independent research finds revenue increased twenty percent YoY".to_string()],
            vec!["Long-run projections remain bearish among academics".to_string()],
        ),
        AgentResult::failure("video", "quota exhausted"),
    ];

    let consolidator = ResultConsolidator::new();
    let first = consolidator.consolidate("acme", Domain::Stocks, &inputs, 3.2);
    let second = consolidator.consolidate("acme", Domain::Stocks, &inputs, 3.2);

    // Everything except the stamp time must match byte for byte.
    let mut first_json = serde_json::to_value(&first).unwrap();
    let mut second_json = serde_json::to_value(&second).unwrap();
    first_json.as_object_mut().unwrap().remove("timestamp");
    second_json.as_object_mut().unwrap().remove("timestamp");
    assert_eq!(first_json, second_json);
}

#[test]
fn totals_follow_successful_agents_only() {
    let mut ok = agent("search", 3, vec![], vec![]);
    ok.tokens = 100;
    ok.cost = 0.01;
    let mut failed = AgentResult::failure("video", "down");
    failed.tokens = 500;
    failed.cost = 1.0;
    failed.sources = vec![source("ignored")];

    let report = ResultConsolidator::new().consolidate("q", Domain::General, &[ok, failed], 0.0);
    assert_eq!(report.total_sources, 3);
    assert_eq!(report.sources.len(), 3);
    assert_eq!(report.total_tokens, 100);
    assert!((report.total_cost - 0.01).abs() < 1e-12);
    assert_eq!(report.successful_agents, vec!["search"]);
}
