//! Host-side state for the tree and list views.
//!
//! A `ViewModel` owns at most one `LoadedProfile`. Loading builds the
//! complete replacement (tree rows, aggregation, ranked rows) before
//! touching the current one, so a failed load leaves the previous view
//! exactly as it was and no view ever shows a half-built tree.

use super::drop::resolve_drop;
use crate::aggregator::{aggregate, compare_entries, rank, AggregatedEntry, RankedEntry};
use crate::aggregator::{SortColumn, SortOrder};
use crate::heatmap::{HeatScale, Rgb};
use crate::output::read_profile;
use crate::parser::{NodeId, ProfileTree};
use crate::tree::{expand_chain, TreeBuilder, TreeEvent};
use crate::utils::config::ViewerConfig;
use crate::utils::error::ProfileError;
use log::{debug, info};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// One visible row of the tree view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRow {
    pub id: NodeId,
    pub depth: usize,
    pub background: Option<Rgb>,
}

/// One row of the flat list view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub entry: RankedEntry,
    pub background: Option<Rgb>,
}

/// Everything derived from one report
#[derive(Debug, Clone)]
pub struct LoadedProfile {
    pub source_path: Option<PathBuf>,
    pub tree: ProfileTree,
    pub tree_rows: Vec<TreeRow>,
    pub functions: HashMap<String, AggregatedEntry>,
    pub list_rows: Vec<ListRow>,
    pub sort: (SortColumn, SortOrder),
}

impl LoadedProfile {
    /// Derive both views from a tree
    pub fn build(
        tree: ProfileTree,
        source_path: Option<PathBuf>,
        heat: &HeatScale,
        sort: (SortColumn, SortOrder),
    ) -> Self {
        let total = tree.root_total_time();

        let tree_rows: Vec<TreeRow> = TreeBuilder::new(&tree)
            .build()
            .filter_map(|event| match event {
                TreeEvent::Enter { id, node, depth } => Some(TreeRow {
                    id,
                    depth,
                    background: heat.background(node.total_time, total),
                }),
                TreeEvent::Exit { .. } => None,
            })
            .collect();

        let functions = aggregate(&tree);
        let list_rows = rank(&functions, sort.0, sort.1)
            .into_iter()
            .map(|entry| ListRow {
                background: heat.background(entry.stats.total_time, total),
                entry,
            })
            .collect();

        Self {
            source_path,
            tree,
            tree_rows,
            functions,
            list_rows,
            sort,
        }
    }

    /// Rows a host expands for "expand full chain" on `row`
    pub fn chain_from(&self, row: NodeId) -> Vec<NodeId> {
        expand_chain(&self.tree, row)
    }
}

/// Result of a drop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    Loaded(PathBuf),
    /// Not a local report file; nothing changed
    Ignored,
}

#[derive(Debug, Clone, Default)]
pub struct ViewModel {
    heat: HeatScale,
    default_sort: SortColumn,
    current: Option<LoadedProfile>,
}

impl ViewModel {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            heat: config.heat_scale(),
            default_sort: config.default_sort,
            current: None,
        }
    }

    pub fn current(&self) -> Option<&LoadedProfile> {
        self.current.as_ref()
    }

    pub fn heat_scale(&self) -> &HeatScale {
        &self.heat
    }

    /// Load a report file, replacing the current view on success
    ///
    /// **Public** - main entry point for file loading
    ///
    /// # Errors
    /// Any `ProfileError`; the current view is left untouched.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<&LoadedProfile, ProfileError> {
        let path = path.as_ref();
        info!("Loading profile: {}", path.display());

        let tree = read_profile(path)?;
        Ok(self.install(tree, Some(path.to_path_buf())))
    }

    /// Install an in-memory tree as the current view
    pub fn load_tree(&mut self, tree: ProfileTree) -> &LoadedProfile {
        self.install(tree, None)
    }

    /// Handle a drop of one or more URLs
    ///
    /// Drops that do not name a local report file are ignored without error.
    pub fn handle_drop<S: AsRef<str>>(&mut self, urls: &[S]) -> Result<DropOutcome, ProfileError> {
        let path = match resolve_drop(urls) {
            Ok(path) => path,
            Err(reason) => {
                debug!("Ignoring drop: {}", reason);
                return Ok(DropOutcome::Ignored);
            }
        };

        self.load_file(&path)?;
        Ok(DropOutcome::Loaded(path))
    }

    /// Re-sort the flat list; the tree view is never reordered
    ///
    /// Returns false when nothing is loaded.
    pub fn sort_list(&mut self, column: SortColumn, order: SortOrder) -> bool {
        let Some(current) = self.current.as_mut() else {
            return false;
        };

        current
            .list_rows
            .sort_by(|a, b| compare_entries(&a.entry, &b.entry, column, order));
        current.sort = (column, order);
        true
    }

    fn install(&mut self, tree: ProfileTree, source_path: Option<PathBuf>) -> &LoadedProfile {
        let sort = (self.default_sort, default_order(self.default_sort));
        let loaded = LoadedProfile::build(tree, source_path, &self.heat, sort);

        debug!(
            "Built {} tree rows and {} list rows",
            loaded.tree_rows.len(),
            loaded.list_rows.len()
        );

        self.current.insert(loaded)
    }
}

/// Names read best A-Z, numbers hottest first
fn default_order(column: SortColumn) -> SortOrder {
    match column {
        SortColumn::Name => SortOrder::Ascending,
        _ => SortOrder::Descending,
    }
}
