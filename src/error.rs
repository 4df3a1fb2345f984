//! Error types for nbtohtml library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::render::HighlightError;

/// Result type alias for nbtohtml operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors that stop a conversion.
///
/// Problems confined to a single cell or output never surface here; they
/// degrade that one item and are reported as [`crate::render::Diagnostic`]s.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The notebook file does not exist.
    #[error("Notebook file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The input is not valid notebook JSON.
    #[error("Notebook parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input is JSON but does not look like a notebook.
    #[error("Unknown file format: not a Jupyter notebook")]
    UnknownFormat,

    /// The notebook format version is older than the supported minimum.
    #[error("Unsupported notebook format version {found} (minimum supported is {minimum})")]
    UnsupportedVersion {
        /// `nbformat` value found in the document
        found: u32,
        /// Minimum `nbformat` accepted by the parser
        minimum: u32,
    },

    /// Syntax highlighter failure.
    #[error("Highlighting error: {0}")]
    Highlight(#[from] HighlightError),

    /// Error during rendering (HTML, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
