//! Configuration and constants for the viewer.

use super::error::ConfigError;
use crate::aggregator::metrics::SortColumn;
use crate::heatmap::{Boundary, HeatScale};
use log::debug;
use serde::Deserialize;
use std::path::Path;

/// Version tag written into exported function lists
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Only files whose name ends with this suffix are accepted from a drop
pub const PROFILE_FILE_SUFFIX: &str = "lua_profile_json.txt";

/// Names starting with this character are unresolved placeholders
/// (the profiler writes `?:file:line` for anonymous functions)
pub const PLACEHOLDER_PREFIX: char = '?';

/// Display name of a root node that carries none
pub const ROOT_NAME: &str = "root";

// Heat map defaults
pub const DEFAULT_HEAT_EXPONENT: f64 = 0.75;
pub const MAX_CHANNEL: u8 = 255;

// Text report layout, as printed by the profiler itself
pub const INDENT_WIDTH: usize = 4;
pub const SPACE_AFTER_NAME: usize = 4;

/// The five fixed columns of both views
pub const COLUMN_HEADERS: [&str; 5] = [
    "Function Name",
    "Count",
    "Total (nanoseconds)",
    "Self (nanoseconds)",
    "Children (nanoseconds)",
];

/// Cosmetic viewer settings, read from an optional TOML file.
///
/// Every field has a default so an empty file is valid:
///
/// ```toml
/// heat_exponent = 0.5
/// heat_boundary = "exclusive"
/// default_sort = "self"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    pub heat_exponent: f64,
    pub heat_boundary: Boundary,
    pub default_sort: SortColumn,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            heat_exponent: DEFAULT_HEAT_EXPONENT,
            heat_boundary: Boundary::Inclusive,
            default_sort: SortColumn::Total,
        }
    }
}

impl ViewerConfig {
    /// Parse settings from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: ViewerConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load settings from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("Loading viewer config from: {}", path.display());

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&text)
    }

    /// Heat scale described by these settings
    pub fn heat_scale(&self) -> HeatScale {
        HeatScale::new(self.heat_exponent).with_boundary(self.heat_boundary)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.heat_exponent.is_finite() || self.heat_exponent <= 0.0 {
            return Err(ConfigError::InvalidValue(format!(
                "heat_exponent must be a positive number, got {}",
                self.heat_exponent
            )));
        }
        Ok(())
    }
}
