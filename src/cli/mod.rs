//! Terminal output for the one-shot research mode.

/// Report rendering for the terminal.
pub mod output;
