//! Ranking and summary statistics over aggregated functions.
//!
//! The flat list view is sorted by one of its five header columns.
//! The default ranking (total time, descending) is what the profiler's
//! own list report prints.

use super::function_stats::AggregatedEntry;
use crate::parser::ProfileTree;
use crate::tree::{build, TreeEvent};
use log::debug;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Column of the flat list view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortColumn {
    Name,
    Count,
    #[default]
    Total,
    #[serde(rename = "self")]
    SelfTime,
    Children,
}

impl FromStr for SortColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Ok(SortColumn::Name),
            "count" => Ok(SortColumn::Count),
            "total" => Ok(SortColumn::Total),
            "self" => Ok(SortColumn::SelfTime),
            "children" => Ok(SortColumn::Children),
            other => Err(format!(
                "unknown column '{}' (expected name, count, total, self or children)",
                other
            )),
        }
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortColumn::Name => "name",
            SortColumn::Count => "count",
            SortColumn::Total => "total",
            SortColumn::SelfTime => "self",
            SortColumn::Children => "children",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

/// One row of the ranked list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    pub function_source: String,

    #[serde(flatten)]
    pub stats: AggregatedEntry,
}

/// Rank aggregated functions by a column
///
/// **Public** - main entry point for the flat list view
///
/// Ties are broken by `function_source` so output is deterministic.
pub fn rank(
    functions: &HashMap<String, AggregatedEntry>,
    column: SortColumn,
    order: SortOrder,
) -> Vec<RankedEntry> {
    let mut entries: Vec<RankedEntry> = functions
        .iter()
        .map(|(source, stats)| RankedEntry {
            function_source: source.clone(),
            stats: stats.clone(),
        })
        .collect();

    sort_entries(&mut entries, column, order);
    entries
}

/// Hottest `top_n` functions by total time
pub fn top_functions(functions: &HashMap<String, AggregatedEntry>, top_n: usize) -> Vec<RankedEntry> {
    debug!("Selecting top {} of {} functions", top_n, functions.len());

    let mut ranked = rank(functions, SortColumn::Total, SortOrder::Descending);
    ranked.truncate(top_n);
    ranked
}

/// Re-sort an already ranked list in place
pub fn sort_entries(entries: &mut [RankedEntry], column: SortColumn, order: SortOrder) {
    entries.sort_by(|a, b| compare_entries(a, b, column, order));
}

/// Row ordering used by every sorted view
pub fn compare_entries(
    a: &RankedEntry,
    b: &RankedEntry,
    column: SortColumn,
    order: SortOrder,
) -> Ordering {
    let primary = compare_column(&a.stats, &b.stats, column);
    let primary = match order {
        SortOrder::Ascending => primary,
        SortOrder::Descending => primary.reverse(),
    };
    primary.then_with(|| a.function_source.cmp(&b.function_source))
}

/// **Private** - column comparator
fn compare_column(a: &AggregatedEntry, b: &AggregatedEntry, column: SortColumn) -> Ordering {
    match column {
        SortColumn::Name => a.function_name.cmp(&b.function_name),
        SortColumn::Count => a.count.cmp(&b.count),
        SortColumn::Total => a.total_time.cmp(&b.total_time),
        SortColumn::SelfTime => a.self_time.cmp(&b.self_time),
        SortColumn::Children => a.children_time.cmp(&b.children_time),
    }
}

/// Shape and hot-spot statistics of a loaded report
///
/// **Public** - returned from calculate_summary
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileSummary {
    /// Nodes in the call tree, root included
    pub node_count: usize,

    /// Deepest nesting level (root = 0)
    pub max_depth: usize,

    /// Distinct function sources
    pub unique_functions: usize,

    /// Root total time, the heat-map denominator
    pub root_total_time: u64,

    /// Name of the function with the largest aggregated total time
    pub hottest_function: Option<String>,

    /// Its share of the root total time, in percent
    pub hottest_percentage: f64,
}

impl ProfileSummary {
    /// Get human-readable summary
    ///
    /// **Public** - for logging and the validate command
    pub fn summary(&self) -> String {
        format!(
            "Nodes: {} | Depth: {} | Functions: {} | Total: {} ns | Hottest: {} ({:.1}%)",
            self.node_count,
            self.max_depth,
            self.unique_functions,
            self.root_total_time,
            self.hottest_function.as_deref().unwrap_or("-"),
            self.hottest_percentage
        )
    }
}

/// Calculate summary statistics for a tree and its aggregation
pub fn calculate_summary(
    tree: &ProfileTree,
    functions: &HashMap<String, AggregatedEntry>,
) -> ProfileSummary {
    let max_depth = build(tree)
        .filter_map(|event| match event {
            TreeEvent::Enter { depth, .. } => Some(depth),
            TreeEvent::Exit { .. } => None,
        })
        .max()
        .unwrap_or(0);

    let root_total_time = tree.root_total_time();
    let hottest = top_functions(functions, 1).into_iter().next();

    let hottest_percentage = match &hottest {
        Some(entry) if root_total_time > 0 => {
            (entry.stats.total_time as f64 / root_total_time as f64) * 100.0
        }
        _ => 0.0,
    };

    ProfileSummary {
        node_count: tree.len(),
        max_depth,
        unique_functions: functions.len(),
        root_total_time,
        hottest_function: hottest.map(|entry| entry.stats.function_name),
        hottest_percentage,
    }
}
