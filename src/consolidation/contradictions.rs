//! Cross-agent contradiction detection.
//!
//! A surface keyword-pair heuristic, not semantic entailment: it scans
//! every pair of statements from different agents for co-occurring antonym
//! keywords. It will miss real contradictions and flag spurious ones
//! ("not bearish" vs "bullish" still matches on bullish/bearish); that
//! imprecision is accepted in exchange for needing no NLP dependency.

use crate::consolidation::text::clean_text;
use crate::types::{AgentResult, Contradiction};

/// Antonym keyword pairs, scanned in order; the first matching pair wins
/// for a given statement pair.
const CONTRADICTION_KEYWORDS: &[(&str, &str)] = &[
    ("increases", "decreases"),
    ("positive", "negative"),
    ("bullish", "bearish"),
    ("effective", "ineffective"),
    ("safe", "unsafe"),
    ("recommended", "not recommended"),
    ("growth", "decline"),
    ("up", "down"),
];

/// Upper bound on reported contradictions.
const MAX_CONTRADICTIONS: usize = 5;
/// Statements are truncated to this many characters for display.
const STATEMENT_PREVIEW_CHARS: usize = 100;

/// Scan findings and insights of all successful agents for opposing-keyword
/// co-occurrence between different agents. Capped at [`MAX_CONTRADICTIONS`].
pub fn detect_contradictions(results: &[AgentResult]) -> Vec<Contradiction> {
    let mut statements: Vec<(String, &str)> = Vec::new();
    for result in results.iter().filter(|r| r.is_success()) {
        for text in result.findings.iter().chain(result.insights.iter()) {
            let cleaned = clean_text(text);
            if !cleaned.is_empty() {
                statements.push((cleaned, result.agent_name.as_str()));
            }
        }
    }

    let mut contradictions = Vec::new();
    for (i, (text1, agent1)) in statements.iter().enumerate() {
        for (text2, agent2) in &statements[i + 1..] {
            if agent1 == agent2 {
                continue;
            }

            let lower1 = text1.to_lowercase();
            let lower2 = text2.to_lowercase();

            for (left, right) in CONTRADICTION_KEYWORDS {
                if (lower1.contains(left) && lower2.contains(right))
                    || (lower2.contains(left) && lower1.contains(right))
                {
                    contradictions.push(Contradiction {
                        agent1: (*agent1).to_string(),
                        statement1: preview(text1),
                        agent2: (*agent2).to_string(),
                        statement2: preview(text2),
                    });
                    break;
                }
            }
        }
    }

    contradictions.truncate(MAX_CONTRADICTIONS);
    contradictions
}

fn preview(text: &str) -> String {
    let mut preview: String = text.chars().take(STATEMENT_PREVIEW_CHARS).collect();
    preview.push_str("...");
    preview
}
