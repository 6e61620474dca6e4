//! Renders a consolidated report for the terminal.

use owo_colors::OwoColorize;

use crate::types::ConsolidatedResult;

/// Render the report as a styled terminal document.
pub fn render_report(result: &ConsolidatedResult) -> String {
    let mut out = String::new();

    out.push_str(&format!("\n{}\n", "Research Report".bold().underline()));
    out.push_str(&format!("{} {}\n", "Query:".bold(), result.query));
    out.push_str(&format!("{} {}\n", "Domain:".bold(), result.domain));
    out.push_str(&format!(
        "{} {}\n",
        "Confidence:".bold(),
        colored_score(result.confidence_score)
    ));
    out.push_str(&format!(
        "{} {} agents, {} sources, {} tokens, ${:.4}, {:.1}s\n",
        "Totals:".bold(),
        result.successful_agents.len(),
        result.total_sources,
        result.total_tokens,
        result.total_cost,
        result.execution_time
    ));

    out.push_str(&format!("\n{}\n{}\n", "Executive Summary".bold().cyan(), result.summary));

    if !result.key_findings.is_empty() {
        out.push_str(&format!("\n{}\n", "Key Findings".bold().cyan()));
        for (idx, finding) in result.key_findings.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", idx + 1, finding));
        }
    }

    if !result.insights.is_empty() {
        out.push_str(&format!("\n{}\n", "Insights".bold().cyan()));
        for insight in &result.insights {
            out.push_str(&format!("  - {insight}\n"));
        }
    }

    if !result.contradictions.is_empty() {
        out.push_str(&format!("\n{}\n", "Contradictions".bold().yellow()));
        for contradiction in &result.contradictions {
            out.push_str(&format!(
                "  {} {}\n  {} {}\n",
                format!("{}:", contradiction.agent1).bold(),
                contradiction.statement1,
                format!("{}:", contradiction.agent2).bold(),
                contradiction.statement2
            ));
        }
    }

    let coverage = &result.coverage_analysis;
    out.push_str(&format!("\n{}\n", "Coverage".bold().cyan()));
    out.push_str(&format!(
        "  breadth: {}, depth: {}, agents: {}\n",
        coverage.breadth,
        coverage.depth,
        coverage.source_types.join(", ")
    ));
    for recommendation in &coverage.recommendations {
        out.push_str(&format!("  {} {recommendation}\n", "hint:".dimmed()));
    }

    out
}

/// Print the report to stdout.
pub fn print_report(result: &ConsolidatedResult) {
    println!("{}", render_report(result));
}

fn colored_score(score: f64) -> String {
    let rendered = format!("{score:.1}/100");
    if score >= 70.0 {
        rendered.green().to_string()
    } else if score >= 40.0 {
        rendered.yellow().to_string()
    } else {
        rendered.red().to_string()
    }
}
