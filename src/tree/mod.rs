//! Hierarchical view support.
//!
//! - `builder`: pre-order Enter/Exit event stream (explicit stack)
//! - `chain`: "expand full chain" navigation helper

pub mod builder;
pub mod chain;

pub use builder::{build, ChildOrder, TreeBuilder, TreeEvent, TreeEvents};
pub use chain::expand_chain;
