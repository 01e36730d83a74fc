//! Merge call-tree nodes into per-function statistics.
//!
//! Every node below the root that carries a `function_source` is folded
//! into one entry per source, summing its counters. The result is a flat
//! map; a consumer wanting a ranked list sorts it (see `metrics::rank`).
//!
//! Example: two calls of the same function from different parents
//! ```text
//! root
//! ├── f (lua:a.lua:1) count:1 total:60
//! └── g
//!     └── f (lua:a.lua:1) count:2 total:20
//! ```
//! produce a single `lua:a.lua:1` entry with count 3 and total 80.

use crate::parser::ProfileTree;
use crate::utils::config::PLACEHOLDER_PREFIX;
use log::debug;
use serde::Serialize;
use std::collections::HashMap;

/// Summed statistics for one function
///
/// **Public** - value type of the aggregation map
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregatedEntry {
    pub function_name: String,
    pub count: u64,
    pub total_time: u64,
    pub self_time: u64,
    pub children_time: u64,
}

impl AggregatedEntry {
    /// Fold another occurrence of the same function into this entry
    ///
    /// A placeholder name is replaced by the first concrete name seen.
    pub fn merge(&mut self, name: &str, count: u64, total: u64, self_time: u64, children: u64) {
        self.count = self.count.saturating_add(count);
        self.total_time = self.total_time.saturating_add(total);
        self.self_time = self.self_time.saturating_add(self_time);
        self.children_time = self.children_time.saturating_add(children);

        if is_placeholder(&self.function_name) && !is_placeholder(name) {
            self.function_name = name.to_string();
        }
    }
}

/// Whether `name` is an unresolved `?`-prefixed placeholder
pub fn is_placeholder(name: &str) -> bool {
    name.starts_with(PLACEHOLDER_PREFIX)
}

/// Aggregate a tree by function source
///
/// **Public** - main entry point for the flat list view
///
/// # Arguments
/// * `tree` - Validated report
///
/// # Returns
/// Map from `function_source` to merged statistics. The root and every
/// node without a source are left out.
pub fn aggregate(tree: &ProfileTree) -> HashMap<String, AggregatedEntry> {
    let mut functions: HashMap<String, AggregatedEntry> = HashMap::new();

    // Visit order does not matter for sums, so a plain LIFO walk is enough
    let mut stack = tree.root().child_ids().to_vec();
    let mut visited = 0usize;

    while let Some(id) = stack.pop() {
        let Some(node) = tree.node(id) else {
            continue;
        };
        visited += 1;
        stack.extend_from_slice(node.child_ids());

        let Some(source) = node.source() else {
            continue;
        };

        match functions.get_mut(source) {
            Some(entry) => entry.merge(
                &node.function_name,
                node.count,
                node.total_time,
                node.self_time,
                node.children_time,
            ),
            None => {
                functions.insert(
                    source.to_string(),
                    AggregatedEntry {
                        function_name: node.function_name.clone(),
                        count: node.count,
                        total_time: node.total_time,
                        self_time: node.self_time,
                        children_time: node.children_time,
                    },
                );
            }
        }
    }

    debug!(
        "Aggregated {} nodes into {} functions",
        visited,
        functions.len()
    );

    functions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_profile_value;
    use serde_json::json;

    fn call(name: &str, source: &str, count: u64, total: u64) -> serde_json::Value {
        json!({ "function_name": name, "function_source": source, "count": count,
                "total_time": total, "self_time": total, "children_time": 0 })
    }

    #[test]
    fn test_merge_same_source() {
        let tree = parse_profile_value(&json!({
            "function_source": null,
            "total_time": 100,
            "children": [call("f", "a.lua:1", 1, 60), call("f", "a.lua:1", 2, 20)]
        }))
        .unwrap();

        let functions = aggregate(&tree);

        assert_eq!(functions.len(), 1);
        assert_eq!(
            functions["a.lua:1"],
            AggregatedEntry {
                function_name: "f".to_string(),
                count: 3,
                total_time: 80,
                self_time: 80,
                children_time: 0,
            }
        );
    }

    #[test]
    fn test_root_never_aggregated() {
        let tree = parse_profile_value(&json!({
            "function_name": "root", "function_source": "root-src", "total_time": 5,
            "children": [call("f", "root-src", 1, 5)]
        }))
        .unwrap();

        assert_eq!(aggregate(&tree)["root-src"].count, 1);
    }

    #[test]
    fn test_nodes_without_source_skipped_but_descended() {
        let mut wrapper = call("wrapper", "", 1, 10);
        wrapper["children"] = json!([call("g", "b.lua:2", 4, 10)]);
        let tree = parse_profile_value(&json!({ "total_time": 10, "children": [wrapper] })).unwrap();

        let functions = aggregate(&tree);
        assert_eq!(functions.len(), 1);
        assert_eq!(functions["b.lua:2"].count, 4);
    }

    #[test]
    fn test_placeholder_name_resolution() {
        let mut entry = AggregatedEntry {
            function_name: "?f1".to_string(),
            ..Default::default()
        };
        entry.merge("f1", 1, 0, 0, 0);
        assert_eq!(entry.function_name, "f1");

        entry.merge("?f1", 1, 0, 0, 0);
        assert_eq!(entry.function_name, "f1");
        assert_eq!(entry.count, 2);
    }

    #[test]
    fn test_concrete_name_kept_over_other_concrete() {
        let mut entry = AggregatedEntry {
            function_name: "first".to_string(),
            ..Default::default()
        };
        entry.merge("second", 1, 0, 0, 0);
        assert_eq!(entry.function_name, "first");
    }
}
