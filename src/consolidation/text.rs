//! Text cleanup and canonicalization.
//!
//! Agent payloads arrive with markdown emphasis, stray HTML, and numeric
//! citation markers baked in. [`clean_text`] strips those for display;
//! [`normalize_text`] additionally lowercases and drops punctuation to
//! produce the canonical form used for similarity comparison. Normalized
//! text is never shown to users.

use regex::Regex;
use std::sync::LazyLock;

struct CleanPatterns {
    html_tags: Regex,
    bold: Regex,
    italic: Regex,
    headings: Regex,
    inline_code: Regex,
    citations: Regex,
    whitespace: Regex,
    non_word: Regex,
}

static PATTERNS: LazyLock<CleanPatterns> = LazyLock::new(|| CleanPatterns {
    html_tags: Regex::new(r"<[^>]+>").unwrap(),
    bold: Regex::new(r"\*\*([^*]+)\*\*").unwrap(),
    italic: Regex::new(r"\*([^*]+)\*").unwrap(),
    headings: Regex::new(r"#{1,6}\s+").unwrap(),
    inline_code: Regex::new(r"`([^`]+)`").unwrap(),
    citations: Regex::new(r"\[\d+\]").unwrap(),
    whitespace: Regex::new(r"\s+").unwrap(),
    non_word: Regex::new(r"[^\w\s]").unwrap(),
});

/// Strip HTML/XML tags, markdown emphasis, heading and code markers, and
/// numeric citation markers; collapse whitespace and trim.
///
/// Total: empty input yields an empty string. Idempotent, so cleaning an
/// already-clean string is a no-op.
pub fn clean_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let p = &*PATTERNS;
    let text = p.html_tags.replace_all(text, "");
    let text = p.bold.replace_all(&text, "$1");
    let text = p.italic.replace_all(&text, "$1");
    let text = p.headings.replace_all(&text, "");
    let text = p.inline_code.replace_all(&text, "$1");
    let text = p.citations.replace_all(&text, "");
    let text = p.whitespace.replace_all(&text, " ");

    text.trim().to_string()
}

/// Canonical lowercase token form for similarity comparison only.
///
/// Lowercases, removes every non-word/non-space character, collapses
/// whitespace, trims.
pub fn normalize_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let p = &*PATTERNS;
    let stripped = p.non_word.replace_all(lowered.trim(), "");
    let collapsed = p.whitespace.replace_all(&stripped, " ");
    collapsed.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_strips_html_tags() {
        assert_eq!(clean_text("<b>Revenue</b> grew <i>fast</i>"), "Revenue grew fast");
    }

    #[test]
    fn test_clean_strips_markdown() {
        assert_eq!(
            clean_text("## Summary\n**Bold claim** with *emphasis* and `code`"),
            "Summary Bold claim with emphasis and code"
        );
    }

    #[test]
    fn test_clean_strips_citation_markers() {
        assert_eq!(
            clean_text("Growth hit 20% last year [1][2]"),
            "Growth hit 20% last year"
        );
    }

    #[test]
    fn test_clean_collapses_whitespace() {
        assert_eq!(clean_text("  a \t b\n\nc  "), "a b c");
    }

    #[test]
    fn test_clean_empty_input() {
        assert_eq!(clean_text(""), "");
    }

    #[test]
    fn test_clean_is_idempotent() {
        let samples = [
            "## Heading with **bold** and [3] citations",
            "plain text already clean",
            "<div>nested <span>tags</span></div>",
            "  spaced   out  ",
        ];
        for sample in samples {
            let once = clean_text(sample);
            assert_eq!(clean_text(&once), once, "clean not idempotent for {sample:?}");
        }
    }

    #[test]
    fn test_normalize_lowercases_and_strips_punctuation() {
        assert_eq!(
            normalize_text("Revenue increased 20%, year-over-year!"),
            "revenue increased 20 yearoveryear"
        );
    }

    #[test]
    fn test_normalize_never_used_for_display_shape() {
        // Normalized text keeps only word characters and single spaces.
        let normalized = normalize_text("A.B.C.  d,e,f");
        assert!(normalized.chars().all(|c| c.is_alphanumeric() || c == ' ' || c == '_'));
    }
}
