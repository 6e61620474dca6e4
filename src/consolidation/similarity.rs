//! Token-set similarity between normalized statements.
//!
//! A cheap bag-of-words overlap is enough to catch two agents restating the
//! same fact in slightly different phrasing, without embeddings or an
//! external NLP service. Inputs are expected to already be in the
//! [`normalize_text`](super::text::normalize_text) form.

use std::collections::HashSet;

/// Jaccard score at or above which two statements count as the same idea.
pub const SIMILARITY_THRESHOLD: f64 = 0.6;

/// Jaccard index of the whitespace-split token sets of `a` and `b`.
///
/// Returns 0.0 when either side has no tokens.
pub fn jaccard_similarity(a: &str, b: &str) -> f64 {
    let words_a: HashSet<&str> = a.split_whitespace().collect();
    let words_b: HashSet<&str> = b.split_whitespace().collect();

    if words_a.is_empty() || words_b.is_empty() {
        return 0.0;
    }

    let intersection = words_a.intersection(&words_b).count();
    let union = words_a.union(&words_b).count();

    intersection as f64 / union as f64
}

/// Whether two normalized statements express the same idea.
///
/// Pure and stateless; O(|a| + |b|) per call. False when either side is
/// empty.
pub fn texts_are_similar(a: &str, b: &str, threshold: f64) -> bool {
    let words_a: HashSet<&str> = a.split_whitespace().collect();
    let words_b: HashSet<&str> = b.split_whitespace().collect();

    if words_a.is_empty() || words_b.is_empty() {
        return false;
    }

    let intersection = words_a.intersection(&words_b).count();
    let union = words_a.union(&words_b).count();

    intersection as f64 / union as f64 >= threshold
}
