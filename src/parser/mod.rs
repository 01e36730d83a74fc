//! Report parsing and the call-tree data model.
//!
//! This module handles:
//! - Parsing raw JSON written by the Lua profiler
//! - Validating every node with its path in the tree
//! - Storing the result in an arena-backed `ProfileTree`

pub mod profile_json;
pub mod schema;

// Re-export main types
pub use profile_json::{parse_profile_str, parse_profile_value};
pub use schema::{NodeId, NodePath, ProfileNode, ProfileTree};
