//! Finding, insight, and summary synthesis across agent results.
//!
//! Raw statements from every successful agent are cleaned, filtered for
//! substance, and deduplicated with token-set similarity. First-seen order
//! wins: a later, possibly more detailed restatement of an accepted idea is
//! dropped, deliberately favoring agent execution order over text quality.

use crate::consolidation::similarity::{texts_are_similar, SIMILARITY_THRESHOLD};
use crate::consolidation::text::{clean_text, normalize_text};
use crate::types::{AgentResult, Domain};

/// Upper bound on synthesized findings.
pub const MAX_FINDINGS: usize = 10;
/// Upper bound on synthesized insights.
pub const MAX_INSIGHTS: usize = 8;
/// Cleaned statements shorter than this are noise or truncated fragments.
const MIN_STATEMENT_CHARS: usize = 20;
/// Agent summaries must exceed this cleaned length to qualify.
const MIN_SUMMARY_CHARS: usize = 50;
/// Upper bound on generated fallback insights.
const MAX_FALLBACK_INSIGHTS: usize = 5;

/// Collect, clean, deduplicate, and cap findings from all successful agents.
pub fn synthesize_findings(results: &[AgentResult]) -> Vec<String> {
    let raw = results
        .iter()
        .filter(|r| r.is_success())
        .flat_map(|r| r.findings.iter().map(String::as_str));
    collect_deduped(raw, MAX_FINDINGS)
}

/// Collect, clean, deduplicate, and cap insights from all successful agents.
///
/// When nothing survives, a deterministic domain-keyed fallback list is
/// generated instead, so the report always carries at least one insight.
pub fn synthesize_insights(results: &[AgentResult], domain: Domain) -> Vec<String> {
    let raw = results
        .iter()
        .filter(|r| r.is_success())
        .flat_map(|r| r.insights.iter().map(String::as_str));
    let insights = collect_deduped(raw, MAX_INSIGHTS);

    if insights.is_empty() {
        return fallback_insights(results, domain);
    }

    insights
}

/// Pick or blend agent summaries into one executive summary.
///
/// Qualifying summaries come from successful agents and must exceed
/// [`MIN_SUMMARY_CHARS`] after cleaning. None qualifying yields a templated
/// fallback sentence; one yields that summary verbatim; several yield the
/// longest (first wins ties) behind a preamble naming the contributing
/// agents. Longest-text-wins is a deliberately simple stand-in for true
/// multi-document summarization: each agent is already prompted to produce
/// a complete executive summary on its own.
pub fn synthesize_summary(results: &[AgentResult], query: &str, domain: Domain) -> String {
    let mut candidates: Vec<(String, &str)> = Vec::new();
    for result in results.iter().filter(|r| r.is_success()) {
        if let Some(raw) = &result.summary {
            let cleaned = clean_text(raw);
            if cleaned.chars().count() > MIN_SUMMARY_CHARS {
                candidates.push((cleaned, result.agent_name.as_str()));
            }
        }
    }

    if candidates.is_empty() {
        let total_sources: usize = results.iter().map(|r| r.source_total()).sum();
        let agent_count = results.iter().filter(|r| r.is_success()).count();
        return fallback_summary(query, domain, total_sources, agent_count);
    }

    if candidates.len() == 1 {
        return candidates.swap_remove(0).0;
    }

    // Longest summary is the primary; earlier agents win length ties.
    let mut primary: &str = &candidates[0].0;
    for (text, _) in &candidates[1..] {
        if text.chars().count() > primary.chars().count() {
            primary = text;
        }
    }

    let mut agent_names: Vec<&str> = Vec::new();
    for (_, agent) in &candidates {
        if !agent_names.contains(agent) {
            agent_names.push(agent);
        }
    }

    let mut summary = format!(
        "**Multi-Agent Research Analysis** ({} agents): ",
        candidates.len()
    );
    if agent_names.len() > 1 {
        summary.push_str(&format!(
            "Insights synthesized from {} sources. ",
            agent_names.join(", ")
        ));
    }
    summary.push_str(primary);
    summary
}

/// Clean each raw statement, drop short fragments, and accept only
/// statements dissimilar to everything accepted so far.
fn collect_deduped<'a>(raw: impl Iterator<Item = &'a str>, limit: usize) -> Vec<String> {
    let mut accepted: Vec<String> = Vec::new();
    let mut accepted_normalized: Vec<String> = Vec::new();

    for text in raw {
        let cleaned = clean_text(text);
        if cleaned.chars().count() < MIN_STATEMENT_CHARS {
            continue;
        }

        let normalized = normalize_text(&cleaned);
        let duplicate = accepted_normalized
            .iter()
            .any(|seen| texts_are_similar(&normalized, seen, SIMILARITY_THRESHOLD));

        if !duplicate {
            accepted_normalized.push(normalized);
            accepted.push(cleaned);
        }
    }

    accepted.truncate(limit);
    accepted
}

fn fallback_summary(query: &str, domain: Domain, total_sources: usize, agent_count: usize) -> String {
    format!(
        "Comprehensive research on '{query}' in the {domain} domain. \
         Analysis utilized {agent_count} specialized agent(s) to examine {total_sources} sources, \
         providing multi-dimensional insights across the available information channels. \
         Detailed findings and sources are listed in the full report."
    )
}

fn fallback_insights(results: &[AgentResult], domain: Domain) -> Vec<String> {
    let total_sources: usize = results.iter().map(|r| r.source_total()).sum();
    let agent_count = results.iter().filter(|r| r.is_success()).count();

    let mut insights = vec![format!(
        "Research incorporates {total_sources} sources from {agent_count} specialized agents, \
         providing comprehensive multi-perspective analysis"
    )];
    insights.extend(domain_observations(domain).iter().map(|s| (*s).to_string()));
    insights.truncate(MAX_FALLBACK_INSIGHTS);
    insights
}

/// Generic per-domain observations used when no agent produced insights.
fn domain_observations(domain: Domain) -> &'static [&'static str] {
    match domain {
        Domain::Technology => &[
            "Technology landscape analysis reveals emerging trends and innovation patterns",
            "Cross-referencing technical sources provides validation of technological claims",
        ],
        Domain::Medical => &[
            "Clinical evidence synthesis requires careful evaluation of source quality and methodology",
            "Multiple data sources help identify consensus and areas of ongoing research",
        ],
        Domain::Academic => &[
            "Scholarly research benefits from diverse source types including peer-reviewed papers and expert analysis",
            "Academic consensus emerges from systematic evaluation of multiple authoritative sources",
        ],
        Domain::Stocks => &[
            "Market analysis requires integration of quantitative data, analyst opinions, and news sentiment",
            "Multiple information sources help identify investment opportunities while managing risk",
        ],
        Domain::General => &[
            "Multi-source analysis provides a robust foundation for informed decision-making",
        ],
    }
}
