//! Lua Profile Viewer CLI
//!
//! Prints the tree and list views of a Lua profiler call-tree report.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use lua_profile_viewer::aggregator::SortColumn;
use lua_profile_viewer::commands::{
    display_schema, display_version, execute_chain, execute_list, execute_open, execute_tree,
    validate_profile_file, ChainArgs, ListArgs, TreeArgs,
};
use lua_profile_viewer::parser::NodePath;
use lua_profile_viewer::utils::ViewerConfig;

/// Lua Profile Viewer - tree and list views of profiler reports
#[derive(Parser, Debug)]
#[command(name = "lua-profile-view")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Viewer settings file (TOML)
    #[arg(long, global = true, env = "LUA_PROFILE_VIEW_CONFIG")]
    config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the call tree
    Tree {
        /// Report file
        file: PathBuf,

        /// Do not print below this depth
        #[arg(long)]
        max_depth: Option<usize>,

        /// Heaviest children first
        #[arg(long)]
        sort_children: bool,

        /// Colour rows by time share
        #[arg(long)]
        heat: bool,
    },

    /// Print functions aggregated by source
    List {
        /// Report file
        file: PathBuf,

        /// Column to sort by: name, count, total, self, children
        #[arg(short, long)]
        sort: Option<SortColumn>,

        /// Smallest first
        #[arg(long)]
        ascending: bool,

        /// Keep only the first N rows
        #[arg(long)]
        top: Option<usize>,

        /// Colour rows by time share
        #[arg(long)]
        heat: bool,

        /// Also write the list as JSON (`-` prints it instead of the table)
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Load dropped URLs the way the viewer does (first URL only)
    Open {
        /// file:// URLs or paths
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Show the rows "expand full chain" opens from a row
    Chain {
        /// Report file
        file: PathBuf,

        /// Row path, e.g. root/0/2
        #[arg(short, long, default_value = "root")]
        path: NodePath,
    },

    /// Validate a report file
    Validate {
        /// Report file
        file: PathBuf,
    },

    /// Display report schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let config = match &cli.config {
        Some(path) => ViewerConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ViewerConfig::default(),
    };

    // Execute command
    match cli.command {
        Commands::Tree {
            file,
            max_depth,
            sort_children,
            heat,
        } => {
            let args = TreeArgs {
                file,
                max_depth,
                sort_children,
                heat,
            };
            print!("{}", execute_tree(&args, &config)?);
        }

        Commands::List {
            file,
            sort,
            ascending,
            top,
            heat,
            export,
        } => {
            let args = ListArgs {
                file,
                sort: sort.unwrap_or(config.default_sort),
                ascending,
                top,
                heat,
                export,
            };
            print!("{}", execute_list(&args, &config)?);
        }

        Commands::Open { urls } => {
            // An ignored drop prints nothing, like the viewer
            if let Some(report) = execute_open(&urls, &config)? {
                print!("{}", report);
            }
        }

        Commands::Chain { file, path } => {
            print!("{}", execute_chain(&ChainArgs { file, path })?);
        }

        Commands::Validate { file } => {
            println!("Validating profile: {}", file.display());
            let summary = validate_profile_file(&file)?;
            println!("✓ Valid profile JSON");
            println!("  {}", summary.summary());
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
