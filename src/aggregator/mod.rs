//! Aggregation of the call tree into per-function statistics.
//!
//! This module transforms a parsed report into:
//! - A map from function source to summed counters
//! - Ranked rows for the flat list view
//! - Summary statistics for the whole report

pub mod function_stats;
pub mod metrics;

// Re-export main types and functions
pub use function_stats::{aggregate, is_placeholder, AggregatedEntry};
pub use metrics::{
    calculate_summary, compare_entries, rank, sort_entries, top_functions, ProfileSummary, RankedEntry,
    SortColumn, SortOrder,
};
