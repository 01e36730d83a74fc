//! Host-side view model.
//!
//! The GUI (or the CLI standing in for it) keeps one `ViewModel`:
//! - `drop`: filters dropped URLs down to a local report file
//! - `view_model`: atomic load-and-replace of tree rows and list rows

pub mod drop;
pub mod view_model;

pub use drop::{is_profile_file_name, resolve_drop};
pub use view_model::{DropOutcome, ListRow, LoadedProfile, TreeRow, ViewModel};
