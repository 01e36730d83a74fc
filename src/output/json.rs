//! JSON report input and function-list export.
//!
//! Reads profiler reports from disk and writes the ranked flat list as
//! a JSON document with proper formatting.

use super::schema::FunctionListExport;
use crate::parser::{parse_profile_str, ProfileTree};
use crate::utils::error::{OutputError, ProfileError};
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Read a profiler report from a file
///
/// **Public** - used by the view model and every command
///
/// # Errors
/// * `ProfileError::Io` - file cannot be opened or read
/// * `ProfileError::InvalidJson` - file is not JSON
/// * `ProfileError::MalformedInput` - JSON is not a call tree
pub fn read_profile(input_path: impl AsRef<Path>) -> Result<ProfileTree, ProfileError> {
    let input_path = input_path.as_ref();

    debug!("Reading profile from: {}", input_path.display());

    let text = std::fs::read_to_string(input_path).map_err(|source| ProfileError::Io {
        path: input_path.to_path_buf(),
        source,
    })?;

    let tree = parse_profile_str(&text)?;

    debug!(
        "Profile loaded: {} nodes, root total {} ns",
        tree.len(),
        tree.root_total_time()
    );

    Ok(tree)
}

/// Write a ranked function list to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_function_list(
    export: &FunctionListExport,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing function list to: {}", output_path.display());

    validate_output_path(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, export).map_err(OutputError::SerializationFailed)?;

    info!(
        "Function list written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Serialize an export to a string (for stdout and tests)
pub fn function_list_to_string(export: &FunctionListExport) -> Result<String, OutputError> {
    serde_json::to_string_pretty(export).map_err(OutputError::SerializationFailed)
}

/// Validate that output path is writable
///
/// **Private** - internal validation
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Calculate file size in bytes
///
/// **Private** - internal utility
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}
