//! CLI library components for list deduplication.

pub mod logging;
pub mod pipeline;
