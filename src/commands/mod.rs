//! CLI command implementations.
//!
//! Commands orchestrate the library components to perform user tasks.
//! Report-producing commands return the rendered text; main.rs prints it.

pub mod models;
pub mod utils;
pub mod view;

// Re-export main command functions
pub use models::{ChainArgs, ListArgs, TreeArgs};
pub use utils::{display_schema, display_version, validate_profile_file};
pub use view::{
    execute_chain, execute_list, execute_open, execute_tree, validate_list_args, STDOUT_EXPORT,
};
