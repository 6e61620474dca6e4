//! Result Consolidation Engine
//!
//! Takes the heterogeneous, partially-failed, differently-shaped outputs of
//! the research agents and synthesizes a single coherent report:
//! deduplicated findings and insights, a blended executive summary,
//! detected cross-agent contradictions, a multi-factor confidence score,
//! and a coverage grading.
//!
//! # Architecture
//!
//! Leaf-first:
//! - [`text`] - strips markup and produces the canonical comparison form
//! - [`similarity`] - token-set (Jaccard) overlap between statements
//! - [`synthesis`] - finding/insight deduplication and summary blending
//! - [`contradictions`] - opposing-keyword co-occurrence scanning
//! - [`scoring`] - bounded 0-100 confidence score
//! - [`coverage`] - breadth/depth tiers and recommendations
//! - [`consolidator`] - the single entry point running all of the above
//!
//! The whole engine is synchronous, CPU-only, and stateless between calls;
//! consolidation always produces a valid report, even from zero or
//! all-failed agent inputs.

/// Consolidation entry point.
pub mod consolidator;
/// Opposing-keyword contradiction detection.
pub mod contradictions;
/// Breadth/depth grading and recommendations.
pub mod coverage;
/// Multi-factor confidence scoring.
pub mod scoring;
/// Token-set similarity.
pub mod similarity;
/// Finding/insight/summary synthesis.
pub mod synthesis;
/// Text cleanup and canonicalization.
pub mod text;

pub use consolidator::ResultConsolidator;
