//! Multi-Agent Research Coordination
//!
//! Fans one research request out to every selected agent concurrently,
//! gathers their results (captured failures included), and hands the full
//! set to the consolidation engine.
//!
//! # Gather semantics
//!
//! All agent calls start together and the coordinator waits for every one
//! of them: one agent's failure never cancels its siblings. A failed task
//! becomes a failed [`AgentResult`](crate::types::AgentResult) that still
//! counts toward the success-rate denominator downstream. There is no
//! timeout, retry, or cancellation here; those belong to the agent layer.

/// Research fan-out and result gathering.
pub mod coordinator;

pub use coordinator::ResearchCoordinator;
