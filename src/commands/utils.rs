use crate::aggregator::{aggregate, calculate_summary, ProfileSummary};
use crate::output::read_profile;
use crate::utils::config::{PROFILE_FILE_SUFFIX, SCHEMA_VERSION};
use crate::viewer::is_profile_file_name;
use anyhow::{Context, Result};
use log::warn;
use std::path::Path;

/// Validate a report file and summarise it
pub fn validate_profile_file(file_path: &Path) -> Result<ProfileSummary> {
    if !is_profile_file_name(file_path) {
        warn!(
            "{} does not end with {}; a drop of this file would be ignored",
            file_path.display(),
            PROFILE_FILE_SUFFIX
        );
    }

    let tree = read_profile(file_path)
        .with_context(|| format!("Invalid profile {}", file_path.display()))?;
    let functions = aggregate(&tree);

    Ok(calculate_summary(&tree, &functions))
}

/// Display report schema information
pub fn display_schema(show_details: bool) {
    println!("Lua Profiler Call-Tree Report");
    println!("Files: *{}", PROFILE_FILE_SUFFIX);
    println!();

    if show_details {
        println!("Node Structure:");
        println!("  function_name: string    - Display name ('?' prefix = unresolved)");
        println!("  function_source: string? - Stable identity, e.g. lua:file.lua:12");
        println!("  count: number            - Invocation count");
        println!("  total_time: number       - Nanoseconds, self + children");
        println!("  self_time: number        - Nanoseconds spent in the function body");
        println!("  children_time: number    - Nanoseconds spent in callees");
        println!("  children: array?         - Callee nodes, in report order");
        println!();
        println!("The root may omit everything except total_time.");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Lua Profile Viewer v{}", env!("CARGO_PKG_VERSION"));
    println!("Export Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Tree and flat-list viewer for Lua profiler call-tree reports.");
}
