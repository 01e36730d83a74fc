//! "Expand full chain" navigation.

use crate::parser::{NodeId, ProfileTree};

/// Nodes a host should expand when the user asks to open the whole chain
/// below `start`.
///
/// Starting at `start`, each node with children is expanded; the walk
/// continues through single-child links and stops at a leaf or at the
/// first branching node (which is expanded so its branches show).
pub fn expand_chain(tree: &ProfileTree, start: NodeId) -> Vec<NodeId> {
    let mut expanded = Vec::new();
    let mut current = start;

    while let Some(node) = tree.node(current) {
        match node.child_ids() {
            [] => break,
            [only] => {
                expanded.push(current);
                current = *only;
            }
            _ => {
                expanded.push(current);
                break;
            }
        }
    }

    expanded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_profile_value, NodePath};
    use serde_json::json;

    fn n(name: &str, children: serde_json::Value) -> serde_json::Value {
        let mut v = json!({ "function_name": name, "function_source": name, "count": 1,
                            "total_time": 1, "self_time": 1, "children_time": 0 });
        if !children.is_null() {
            v["children"] = children;
        }
        v
    }

    #[test]
    fn test_chain_stops_at_branch() {
        let branch = n("c", json!([n("d", json!(null)), n("e", json!(null))]));
        let doc = json!({ "total_time": 1, "children": [n("a", json!([n("b", json!([branch]))]))] });
        let tree = parse_profile_value(&doc).unwrap();

        let start = tree.resolve(&NodePath(vec![0])).unwrap();
        let names: Vec<_> = expand_chain(&tree, start)
            .into_iter()
            .map(|id| tree.node(id).unwrap().function_name.as_str())
            .collect();

        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_chain_on_leaf_is_empty() {
        let doc = json!({ "total_time": 1, "children": [n("a", json!(null))] });
        let tree = parse_profile_value(&doc).unwrap();
        let leaf = tree.resolve(&NodePath(vec![0])).unwrap();
        assert!(expand_chain(&tree, leaf).is_empty());
    }

    #[test]
    fn test_chain_ends_at_leaf() {
        let doc = json!({ "total_time": 1, "children": [n("a", json!([n("b", json!(null))]))] });
        let tree = parse_profile_value(&doc).unwrap();
        assert_eq!(expand_chain(&tree, tree.root_id()).len(), 2);
    }
}
