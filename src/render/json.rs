//! JSON rendering for notebooks.

use crate::error::{Error, Result};
use crate::model::Notebook;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a parsed notebook back to JSON.
///
/// The output is the normalized document model: multi-line strings become
/// arrays of fragments, unknown MIME types and fields are gone.
pub fn to_json(notebook: &Notebook, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(notebook),
        JsonFormat::Compact => serde_json::to_string(notebook),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
