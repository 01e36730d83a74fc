//! Exported function-list JSON schema.

use crate::aggregator::RankedEntry;
use crate::utils::config::SCHEMA_VERSION;
use serde::Serialize;

/// Ranked flat list written by `list --export`
#[derive(Debug, Clone, Serialize)]
pub struct FunctionListExport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Report the list was built from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,

    /// Timestamp when the list was generated
    pub generated_at: String,

    /// Root total time of the report
    pub root_total_time: u64,

    pub functions: Vec<RankedEntry>,
}

impl FunctionListExport {
    pub fn new(
        source_file: Option<String>,
        root_total_time: u64,
        functions: Vec<RankedEntry>,
    ) -> Self {
        use chrono::Utc;

        Self {
            version: SCHEMA_VERSION.to_string(),
            source_file,
            generated_at: Utc::now().to_rfc3339(),
            root_total_time,
            functions,
        }
    }
}
