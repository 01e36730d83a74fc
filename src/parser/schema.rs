//! In-memory model of a profiler call-tree report.
//!
//! The report is a single JSON object per node:
//!
//! ```json
//! { "function_name": "f:a.lua:1", "function_source": "lua:a.lua:1",
//!   "count": 2, "total_time": 80, "self_time": 50, "children_time": 30,
//!   "children": [ ... ] }
//! ```
//!
//! Nodes are stored in an arena (`ProfileTree`) and addressed by `NodeId`,
//! so walking and dropping very deep trees never recurses.

use serde::Serialize;
use std::fmt;

/// Index of a node inside its `ProfileTree`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NodeId(pub usize);

/// Index chain from the root to a node (`[]` is the root itself).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct NodePath(pub Vec<usize>);

impl NodePath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Path of the `index`-th child of this node
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("root")?;
        for index in &self.0 {
            write!(f, "/{}", index)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for NodePath {
    type Err = String;

    /// Accepts `root`, `root/0/2`, `0/2` or an empty string
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let rest = trimmed.strip_prefix("root").unwrap_or(trimmed);

        rest.split('/')
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<usize>()
                    .map_err(|e| format!("invalid path segment '{}': {}", part, e))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(NodePath)
    }
}

/// One call-tree entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileNode {
    /// Display name, may be a `?`-prefixed placeholder
    pub function_name: String,

    /// Stable identity (e.g. `lua:a.lua:12`); `None` when absent, null or empty
    pub function_source: Option<String>,

    pub count: u64,
    pub total_time: u64,
    pub self_time: u64,
    pub children_time: u64,

    /// `None` when the report had no `children` key at all.
    /// `Some(vec![])` is kept distinct: it still opens a nesting level.
    pub children: Option<Vec<NodeId>>,
}

impl ProfileNode {
    pub fn child_ids(&self) -> &[NodeId] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn has_children_field(&self) -> bool {
        self.children.is_some()
    }

    /// Source identity, if this node takes part in aggregation
    pub fn source(&self) -> Option<&str> {
        self.function_source.as_deref().filter(|s| !s.is_empty())
    }
}

/// Whole report: an arena of nodes with a fixed root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileTree {
    nodes: Vec<ProfileNode>,
    root: NodeId,
}

impl ProfileTree {
    /// Tree holding a single root node
    pub fn new(root: ProfileNode) -> Self {
        Self {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    /// Append `child` under `parent`, creating the children list if needed
    ///
    /// # Panics
    /// If `parent` does not belong to this tree.
    pub fn push_child(&mut self, parent: NodeId, child: ProfileNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(child);
        self.nodes[parent.0]
            .children
            .get_or_insert_with(Vec::new)
            .push(id);
        id
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    pub fn root(&self) -> &ProfileNode {
        &self.nodes[self.root.0]
    }

    pub fn node(&self, id: NodeId) -> Option<&ProfileNode> {
        self.nodes.get(id.0)
    }

    /// Number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Normalisation denominator for heat colouring
    pub fn root_total_time(&self) -> u64 {
        self.root().total_time
    }

    /// Follow an index chain from the root
    pub fn resolve(&self, path: &NodePath) -> Option<NodeId> {
        let mut current = self.root;
        for &index in path.indices() {
            current = *self.node(current)?.child_ids().get(index)?;
        }
        Some(current)
    }
}
