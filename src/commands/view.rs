//! Tree, list, open and chain commands.
//!
//! Each command:
//! 1. Loads the report
//! 2. Builds the view it needs (tree walk or aggregation)
//! 3. Renders it as text

use super::models::{ChainArgs, ListArgs, TreeArgs};
use crate::aggregator::{aggregate, calculate_summary, rank, SortOrder};
use crate::output::{
    function_list_to_string, read_profile, render_list_report, render_tree_report,
    write_function_list, FunctionListExport,
};
use crate::parser::ProfileTree;
use crate::tree::{expand_chain, ChildOrder, TreeBuilder};
use crate::utils::config::{ViewerConfig, INDENT_WIDTH};
use crate::viewer::{DropOutcome, ViewModel};
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::Path;
use std::time::Instant;

/// Rows printed by `open` under the summary
const OPEN_LIST_ROWS: usize = 10;

/// `--export` target meaning "print the JSON instead of the table"
pub const STDOUT_EXPORT: &str = "-";

/// Execute the tree command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// The indented report
pub fn execute_tree(args: &TreeArgs, config: &ViewerConfig) -> Result<String> {
    let tree = load(&args.file)?;

    let order = if args.sort_children {
        ChildOrder::TotalTimeDescending
    } else {
        ChildOrder::Original
    };

    let events = TreeBuilder::new(&tree)
        .max_depth(args.max_depth)
        .child_order(order)
        .build();

    let heat = config.heat_scale();
    Ok(render_tree_report(
        events,
        tree.root_total_time(),
        args.heat.then_some(&heat),
    ))
}

/// Execute the list command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// The table, or the JSON export itself when exporting to `-`
///
/// # Errors
/// * Report cannot be loaded
/// * Export file cannot be written
pub fn execute_list(args: &ListArgs, config: &ViewerConfig) -> Result<String> {
    validate_list_args(args)?;

    let start_time = Instant::now();
    let tree = load(&args.file)?;

    let functions = aggregate(&tree);
    let order = if args.ascending {
        SortOrder::Ascending
    } else {
        SortOrder::Descending
    };

    let mut entries = rank(&functions, args.sort, order);
    if let Some(top) = args.top {
        entries.truncate(top);
    }

    debug!(
        "Ranked {} functions by {} ({:?})",
        entries.len(),
        args.sort,
        order
    );

    if let Some(export_path) = &args.export {
        let export = FunctionListExport::new(
            Some(args.file.display().to_string()),
            tree.root_total_time(),
            entries.clone(),
        );

        if export_path.as_os_str() == STDOUT_EXPORT {
            let json = function_list_to_string(&export)
                .context("Failed to serialize function list")?;
            return Ok(json + "\n");
        }

        write_function_list(&export, export_path)
            .context("Failed to write function list JSON")?;
        info!("✓ Function list written to: {}", export_path.display());
    }

    let heat = config.heat_scale();
    let report = render_list_report(&entries, tree.root_total_time(), args.heat.then_some(&heat));

    info!(
        "List built in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(report)
}

/// Execute the open command: load the first URL as if it were dropped
///
/// # Returns
/// `None` when the drop was ignored, otherwise a summary followed by the
/// hottest functions
pub fn execute_open(urls: &[String], config: &ViewerConfig) -> Result<Option<String>> {
    let mut model = ViewModel::new(config);

    let path = match model.handle_drop(urls).context("Failed to load dropped file")? {
        DropOutcome::Ignored => return Ok(None),
        DropOutcome::Loaded(path) => path,
    };

    let Some(loaded) = model.current() else {
        return Ok(None);
    };

    let summary = calculate_summary(&loaded.tree, &loaded.functions);
    let entries: Vec<_> = loaded
        .list_rows
        .iter()
        .take(OPEN_LIST_ROWS)
        .map(|row| row.entry.clone())
        .collect();

    let mut out = format!("{}\n{}\n\n", path.display(), summary.summary());
    out.push_str(&render_list_report(
        &entries,
        loaded.tree.root_total_time(),
        None,
    ));

    Ok(Some(out))
}

/// Execute the chain command
///
/// Lists the rows "expand full chain" opens, starting at `args.path`.
pub fn execute_chain(args: &ChainArgs) -> Result<String> {
    let tree = load(&args.file)?;

    let start = tree
        .resolve(&args.path)
        .with_context(|| format!("No node at {}", args.path))?;

    let mut out = String::new();
    let mut path = args.path.clone();

    for (step, id) in expand_chain(&tree, start).into_iter().enumerate() {
        if step > 0 {
            // every link after the start is an only child
            path = path.child(0);
        }
        if let Some(node) = tree.node(id) {
            out.push_str(&format!(
                "{}{}  [{}]  total:{}\n",
                " ".repeat(step * INDENT_WIDTH),
                node.function_name,
                path,
                node.total_time
            ));
        }
    }

    if out.is_empty() {
        out = format!("{} has no children to expand\n", args.path);
    }

    Ok(out)
}

/// Validate list arguments
///
/// **Public** - can be called before execute_list for early validation
pub fn validate_list_args(args: &ListArgs) -> Result<()> {
    if args.file.as_os_str().is_empty() {
        anyhow::bail!("Report file cannot be empty");
    }

    if args.top == Some(0) {
        anyhow::bail!("top must be greater than 0");
    }

    Ok(())
}

/// **Private** - read a report with file context
fn load(path: &Path) -> Result<ProfileTree> {
    read_profile(path).with_context(|| format!("Failed to load profile {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_validate_list_args_valid() {
        let args = ListArgs {
            file: PathBuf::from("1.lua_profile_json.txt"),
            top: Some(5),
            ..Default::default()
        };
        assert!(validate_list_args(&args).is_ok());
    }

    #[test]
    fn test_validate_list_args_empty_file() {
        assert!(validate_list_args(&ListArgs::default()).is_err());
    }

    #[test]
    fn test_validate_list_args_top_zero() {
        let args = ListArgs {
            file: PathBuf::from("1.lua_profile_json.txt"),
            top: Some(0),
            ..Default::default()
        };
        assert!(validate_list_args(&args).is_err());
    }

    #[test]
    fn test_open_ignores_other_files() {
        let result = execute_open(&["file:///tmp/notes.txt".to_string()], &ViewerConfig::default());
        assert!(result.unwrap().is_none());
    }
}
