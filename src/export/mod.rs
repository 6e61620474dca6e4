//! Report export.
//!
//! Renders a stored report verbatim; nothing here recomputes or reorders
//! report content. The consolidated result is plain acyclic data, so the
//! JSON renderer always terminates.

use std::fmt::Write as _;

use crate::types::{AppError, HistoryEntry, Result};

/// Sources beyond this count are left out of the rendered document.
const MAX_EXPORT_SOURCES: usize = 20;

/// Pretty-printed JSON rendering of a stored report.
pub fn to_json(entry: &HistoryEntry) -> Result<String> {
    serde_json::to_string_pretty(entry)
        .map_err(|e| AppError::Internal(format!("Failed to serialize report: {e}")))
}

/// Markdown rendering of a stored report.
pub fn to_markdown(entry: &HistoryEntry) -> String {
    let result = &entry.result;
    let mut doc = String::new();

    let _ = writeln!(doc, "# Research Report");
    let _ = writeln!(doc);
    let _ = writeln!(doc, "- **Query:** {}", result.query);
    let _ = writeln!(doc, "- **Domain:** {}", result.domain);
    let _ = writeln!(doc, "- **Date:** {}", entry.timestamp.to_rfc3339());
    let _ = writeln!(doc, "- **Confidence Score:** {}/100", result.confidence_score);
    let _ = writeln!(doc);

    let _ = writeln!(doc, "## Executive Summary");
    let _ = writeln!(doc);
    let _ = writeln!(doc, "{}", result.summary);
    let _ = writeln!(doc);

    if !result.key_findings.is_empty() {
        let _ = writeln!(doc, "## Key Findings");
        let _ = writeln!(doc);
        for (idx, finding) in result.key_findings.iter().enumerate() {
            let _ = writeln!(doc, "{}. {}", idx + 1, finding);
        }
        let _ = writeln!(doc);
    }

    if !result.insights.is_empty() {
        let _ = writeln!(doc, "## Insights");
        let _ = writeln!(doc);
        for insight in &result.insights {
            let _ = writeln!(doc, "- {}", insight);
        }
        let _ = writeln!(doc);
    }

    if !result.contradictions.is_empty() {
        let _ = writeln!(doc, "## Contradictions");
        let _ = writeln!(doc);
        for contradiction in &result.contradictions {
            let _ = writeln!(
                doc,
                "- **{}**: {}\n  **{}**: {}",
                contradiction.agent1,
                contradiction.statement1,
                contradiction.agent2,
                contradiction.statement2
            );
        }
        let _ = writeln!(doc);
    }

    let coverage = &result.coverage_analysis;
    let _ = writeln!(doc, "## Coverage");
    let _ = writeln!(doc);
    let _ = writeln!(doc, "- **Breadth:** {}", coverage.breadth);
    let _ = writeln!(doc, "- **Depth:** {}", coverage.depth);
    let _ = writeln!(doc, "- **Source types:** {}", coverage.source_types.join(", "));
    for recommendation in &coverage.recommendations {
        let _ = writeln!(doc, "- _Recommendation:_ {}", recommendation);
    }
    let _ = writeln!(doc);

    let _ = writeln!(
        doc,
        "## Sources ({} total, {} tokens, ${:.4})",
        result.total_sources, result.total_tokens, result.total_cost
    );
    let _ = writeln!(doc);
    for source in result.sources.iter().take(MAX_EXPORT_SOURCES) {
        match &source.url {
            Some(url) => {
                let _ = writeln!(doc, "- [{}]({})", source.title, url);
            }
            None => {
                let _ = writeln!(doc, "- {}", source.title);
            }
        }
    }
    if result.sources.len() > MAX_EXPORT_SOURCES {
        let _ = writeln!(
            doc,
            "- ... and {} more",
            result.sources.len() - MAX_EXPORT_SOURCES
        );
    }

    doc
}
