//! Lua Profile Viewer
//!
//! Loads the call-tree JSON reports written by the Lua profiler
//! (`*.lua_profile_json.txt`) and turns them into the two views a
//! viewer shows: a hierarchical tree and a flat list aggregated per
//! function, both heat-coloured by share of total time.
//!
//! ## Getting Started
//!
//! ```bash
//! lua-profile-view tree 1700000000.lua_profile_json.txt --heat
//! lua-profile-view list 1700000000.lua_profile_json.txt --sort self --top 20
//! ```
//!
//! Library users drive a `viewer::ViewModel`, or use the pieces directly:
//! `output::read_profile`, `tree::TreeBuilder` and `aggregator::aggregate`.

pub mod aggregator;
pub mod commands;
pub mod heatmap;
pub mod output;
pub mod parser;
pub mod tree;
pub mod utils;
pub mod viewer;
