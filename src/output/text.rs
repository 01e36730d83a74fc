//! Plain-text reports for the terminal.
//!
//! Both views share the five fixed columns. The tree report indents the
//! name column by nesting depth; the list report is flat. With a heat
//! scale the name cell gets a white-to-red background.

use crate::aggregator::RankedEntry;
use crate::heatmap::{HeatScale, Rgb};
use crate::tree::TreeEvent;
use crate::utils::config::{COLUMN_HEADERS, INDENT_WIDTH, SPACE_AFTER_NAME};
use colored::Colorize;

const COLUMN_GAP: &str = "  ";

struct Row {
    name: String,
    cells: [String; 4],
    background: Option<Rgb>,
}

impl Row {
    fn new(name: String, counters: [u64; 4], background: Option<Rgb>) -> Self {
        Self {
            name,
            cells: counters.map(|value| value.to_string()),
            background,
        }
    }
}

/// Render a tree walk as an indented table
///
/// **Public** - used by the tree command
///
/// # Arguments
/// * `events` - Event stream from `TreeBuilder`
/// * `total_time` - Report total, denominator of the heat scale
/// * `heat` - Colour rows when set
pub fn render_tree_report<'a>(
    events: impl IntoIterator<Item = TreeEvent<'a>>,
    total_time: u64,
    heat: Option<&HeatScale>,
) -> String {
    let rows: Vec<Row> = events
        .into_iter()
        .filter_map(|event| match event {
            TreeEvent::Enter { node, depth, .. } => Some(Row::new(
                format!("{}{}", " ".repeat(depth * INDENT_WIDTH), node.function_name),
                [node.count, node.total_time, node.self_time, node.children_time],
                heat.and_then(|scale| scale.background(node.total_time, total_time)),
            )),
            TreeEvent::Exit { .. } => None,
        })
        .collect();

    render_table(&rows)
}

/// Render ranked functions as a flat table
///
/// **Public** - used by the list command
pub fn render_list_report(
    entries: &[RankedEntry],
    total_time: u64,
    heat: Option<&HeatScale>,
) -> String {
    let rows: Vec<Row> = entries
        .iter()
        .map(|entry| {
            let stats = &entry.stats;
            Row::new(
                stats.function_name.clone(),
                [stats.count, stats.total_time, stats.self_time, stats.children_time],
                heat.and_then(|scale| scale.background(stats.total_time, total_time)),
            )
        })
        .collect();

    render_table(&rows)
}

/// **Private** - shared table layout
fn render_table(rows: &[Row]) -> String {
    let name_width = rows
        .iter()
        .map(|row| row.name.chars().count())
        .chain(std::iter::once(COLUMN_HEADERS[0].len()))
        .max()
        .unwrap_or(0)
        + SPACE_AFTER_NAME;

    let mut widths = [0usize; 4];
    for (i, width) in widths.iter_mut().enumerate() {
        *width = rows
            .iter()
            .map(|row| row.cells[i].len())
            .chain(std::iter::once(COLUMN_HEADERS[i + 1].len()))
            .max()
            .unwrap_or(0);
    }

    let mut out = String::new();

    out.push_str(&format!("{:<name_width$}", COLUMN_HEADERS[0]));
    for (header, width) in COLUMN_HEADERS[1..].iter().zip(widths) {
        out.push_str(&format!("{}{:>width$}", COLUMN_GAP, header));
    }
    out.push('\n');

    for row in rows {
        let name = format!("{:<name_width$}", row.name);
        match row.background {
            Some(rgb) => out.push_str(
                &name
                    .on_truecolor(rgb.r, rgb.g, rgb.b)
                    .truecolor(0, 0, 0)
                    .to_string(),
            ),
            None => out.push_str(&name),
        }
        for (cell, width) in row.cells.iter().zip(widths) {
            out.push_str(&format!("{}{:>width$}", COLUMN_GAP, cell));
        }
        out.push('\n');
    }

    out
}
