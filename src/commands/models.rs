use crate::aggregator::SortColumn;
use crate::parser::NodePath;
use std::path::PathBuf;

/// Arguments for the tree command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone, Default)]
pub struct TreeArgs {
    /// Report file
    pub file: PathBuf,

    /// Deepest level to print (None = everything)
    pub max_depth: Option<usize>,

    /// Heaviest children first instead of report order
    pub sort_children: bool,

    /// Colour rows by time share
    pub heat: bool,
}

/// Arguments for the list command
#[derive(Debug, Clone)]
pub struct ListArgs {
    /// Report file
    pub file: PathBuf,

    /// Column to sort by
    pub sort: SortColumn,

    /// Smallest first
    pub ascending: bool,

    /// Keep only the first N rows
    pub top: Option<usize>,

    /// Colour rows by time share
    pub heat: bool,

    /// Also write the ranked list as JSON
    pub export: Option<PathBuf>,
}

impl Default for ListArgs {
    fn default() -> Self {
        Self {
            file: PathBuf::new(),
            sort: SortColumn::Total,
            ascending: false,
            top: None,
            heat: false,
            export: None,
        }
    }
}

/// Arguments for the chain command
#[derive(Debug, Clone, Default)]
pub struct ChainArgs {
    /// Report file
    pub file: PathBuf,

    /// Row to start from
    pub path: NodePath,
}
