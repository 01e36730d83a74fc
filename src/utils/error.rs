//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use crate::parser::schema::NodePath;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a profile report
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Malformed profile at {path}: {reason}")]
    MalformedInput { path: NodePath, reason: String },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl ProfileError {
    /// Build a `MalformedInput` for the node at `path`
    pub fn malformed(path: &NodePath, reason: impl Into<String>) -> Self {
        ProfileError::MalformedInput {
            path: path.clone(),
            reason: reason.into(),
        }
    }
}

/// Rejections from the drop pre-filter.
///
/// These are never shown to the user; a rejected drop is simply ignored.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SourceError {
    #[error("Unsupported drop source: {0}")]
    UnsupportedSource(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// Errors that can occur while reading the viewer settings file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}
