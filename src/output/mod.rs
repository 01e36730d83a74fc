//! Report input and output.
//!
//! This module handles:
//! - Reading profiler reports from disk
//! - Text tree and list reports
//! - JSON export of the ranked function list

pub mod json;
pub mod schema;
pub mod text;

// Re-export main functions
pub use json::{function_list_to_string, read_profile, write_function_list};
pub use schema::FunctionListExport;
pub use text::{render_list_report, render_tree_report};
