//! Pre-order event stream over a call tree.
//!
//! Drives a hierarchical display: every node produces an `Enter` event in
//! pre-order, and every nesting level that was opened produces a matching
//! `Exit`. The walk uses an explicit work stack, so depth is bounded only
//! by memory.
//!
//! A node opens a nesting level when its `children` key was present in the
//! report, even if the list is empty. In that case the `Enter` is
//! immediately followed by an `Exit`.

use crate::parser::{NodeId, ProfileNode, ProfileTree};
use std::iter::FusedIterator;

/// One step of the walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeEvent<'a> {
    /// A node becomes visible at `depth` (root is depth 0)
    Enter {
        id: NodeId,
        node: &'a ProfileNode,
        depth: usize,
    },

    /// The level of children at `depth` is closed
    Exit { depth: usize },
}

impl TreeEvent<'_> {
    pub fn is_enter(&self) -> bool {
        matches!(self, TreeEvent::Enter { .. })
    }
}

/// Order in which siblings are emitted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChildOrder {
    /// Order of the report
    #[default]
    Original,

    /// Heaviest `total_time` first; ties keep report order
    TotalTimeDescending,
}

/// Configures a walk over one tree
///
/// **Public** - main entry point for tree display
///
/// # Example
/// ```ignore
/// let events: Vec<_> = TreeBuilder::new(&tree).max_depth(Some(3)).build().collect();
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TreeBuilder<'a> {
    tree: &'a ProfileTree,
    max_depth: Option<usize>,
    order: ChildOrder,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(tree: &'a ProfileTree) -> Self {
        Self {
            tree,
            max_depth: None,
            order: ChildOrder::Original,
        }
    }

    /// Do not descend below `depth`; nodes at that depth are still emitted
    pub fn max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn child_order(mut self, order: ChildOrder) -> Self {
        self.order = order;
        self
    }

    /// Start the walk
    pub fn build(self) -> TreeEvents<'a> {
        TreeEvents {
            tree: self.tree,
            stack: vec![Work::Visit(self.tree.root_id())],
            depth: 0,
            max_depth: self.max_depth,
            order: self.order,
        }
    }
}

/// Walk `tree` with default settings
pub fn build(tree: &ProfileTree) -> TreeEvents<'_> {
    TreeBuilder::new(tree).build()
}

#[derive(Debug, Clone, Copy)]
enum Work {
    Visit(NodeId),
    Close,
}

/// Lazy, finite, single-pass sequence of `TreeEvent`s
#[derive(Debug)]
pub struct TreeEvents<'a> {
    tree: &'a ProfileTree,
    stack: Vec<Work>,
    depth: usize,
    max_depth: Option<usize>,
    order: ChildOrder,
}

impl<'a> TreeEvents<'a> {
    /// Queue a sentinel and the children so they pop in display order
    fn open(&mut self, node: &'a ProfileNode) {
        self.stack.push(Work::Close);
        self.depth += 1;

        let children = node.child_ids();
        match self.order {
            ChildOrder::Original => {
                self.stack
                    .extend(children.iter().rev().map(|id| Work::Visit(*id)));
            }
            ChildOrder::TotalTimeDescending => {
                let mut sorted = children.to_vec();
                sorted.sort_by_key(|id| {
                    std::cmp::Reverse(self.tree.node(*id).map_or(0, |n| n.total_time))
                });
                self.stack.extend(sorted.into_iter().rev().map(Work::Visit));
            }
        }
    }
}

impl<'a> Iterator for TreeEvents<'a> {
    type Item = TreeEvent<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.stack.pop()? {
                Work::Close => {
                    self.depth -= 1;
                    return Some(TreeEvent::Exit {
                        depth: self.depth + 1,
                    });
                }
                Work::Visit(id) => {
                    // ids always come from the same tree
                    let Some(node) = self.tree.node(id) else {
                        continue;
                    };
                    let depth = self.depth;

                    let may_descend = self.max_depth.map_or(true, |max| depth < max);
                    if node.has_children_field() && may_descend {
                        self.open(node);
                    }

                    return Some(TreeEvent::Enter { id, node, depth });
                }
            }
        }
    }
}

impl FusedIterator for TreeEvents<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_profile_value;
    use serde_json::json;

    fn node(name: &str, total: u64) -> serde_json::Value {
        json!({ "function_name": name, "function_source": name, "count": 1,
                "total_time": total, "self_time": total, "children_time": 0 })
    }

    fn sample() -> ProfileTree {
        let mut a = node("a", 10);
        a["children"] = json!([node("a1", 3), node("a2", 7)]);
        parse_profile_value(&json!({
            "function_name": "root", "total_time": 30,
            "children": [a, node("b", 20)]
        }))
        .unwrap()
    }

    fn render(events: TreeEvents<'_>) -> Vec<String> {
        events
            .map(|e| match e {
                TreeEvent::Enter { node, depth, .. } => format!("+{}@{}", node.function_name, depth),
                TreeEvent::Exit { depth } => format!("-{}", depth),
            })
            .collect()
    }

    #[test]
    fn test_preorder_with_exits() {
        let tree = sample();
        assert_eq!(
            render(build(&tree)),
            vec!["+root@0", "+a@1", "+a1@2", "+a2@2", "-2", "+b@1", "-1"]
        );
    }

    #[test]
    fn test_total_time_order() {
        let tree = sample();
        let events = TreeBuilder::new(&tree)
            .child_order(ChildOrder::TotalTimeDescending)
            .build();
        assert_eq!(
            render(events),
            vec!["+root@0", "+b@1", "+a@1", "+a2@2", "+a1@2", "-2", "-1"]
        );
    }

    #[test]
    fn test_max_depth_cuts_descent() {
        let tree = sample();
        let events = TreeBuilder::new(&tree).max_depth(Some(1)).build();
        assert_eq!(render(events), vec!["+root@0", "+a@1", "+b@1", "-1"]);
    }

    #[test]
    fn test_max_depth_zero_only_root() {
        let tree = sample();
        let events = TreeBuilder::new(&tree).max_depth(Some(0)).build();
        assert_eq!(render(events), vec!["+root@0"]);
    }

    #[test]
    fn test_empty_children_open_and_close() {
        let tree = parse_profile_value(&json!({ "total_time": 0, "children": [] })).unwrap();
        assert_eq!(render(build(&tree)), vec!["+root@0", "-1"]);
    }

    #[test]
    fn test_leaf_root() {
        let tree = parse_profile_value(&json!({ "total_time": 0 })).unwrap();
        assert_eq!(render(build(&tree)), vec!["+root@0"]);
    }

    #[test]
    fn test_events_are_fused() {
        let tree = sample();
        let mut events = build(&tree);
        while events.next().is_some() {}
        assert!(events.next().is_none());
    }
}
