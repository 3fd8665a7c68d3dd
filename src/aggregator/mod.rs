//! Aggregation of trace records into summary statistics.
//!
//! This module turns parsed trace records into:
//! - Per-RNTI allocation counts and symbol totals
//! - Allocation counts by TTI type
//! - The covered slot range

pub mod metrics;

// Re-export main types and functions
pub use metrics::{summarize, top_ues, TraceSummary, TypeCounts, UeSummary};
