//! Notebook format detection and version validation.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Minimum `nbformat` major version the pipeline accepts.
pub const MIN_NBFORMAT: u32 = 4;

/// Notebook format information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotebookFormat {
    /// Major version (`nbformat`)
    pub major: u32,
    /// Minor version (`nbformat_minor`)
    pub minor: u32,
}

impl NotebookFormat {
    /// Check whether this version meets the given minimum major version.
    pub fn is_supported(&self, minimum: u32) -> bool {
        self.major >= minimum
    }
}

impl std::fmt::Display for NotebookFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "nbformat {}.{}", self.major, self.minor)
    }
}

/// Only the version header; everything else is skipped by the decoder.
#[derive(Deserialize)]
struct Header {
    nbformat: Option<u32>,
    #[serde(default)]
    nbformat_minor: u32,
}

/// Detect the notebook format from a JSON string.
///
/// # Returns
/// * `Ok(NotebookFormat)` if the text is a JSON object with an `nbformat` field
/// * `Err(Error::UnknownFormat)` otherwise
///
/// # Example
/// ```
/// use nbtohtml::detect::detect_format_from_str;
///
/// let format = detect_format_from_str(r#"{"nbformat": 4, "nbformat_minor": 5}"#).unwrap();
/// assert_eq!(format.major, 4);
/// ```
pub fn detect_format_from_str(text: &str) -> Result<NotebookFormat> {
    let header: Header = serde_json::from_str(text).map_err(|_| Error::UnknownFormat)?;
    let major = header.nbformat.ok_or(Error::UnknownFormat)?;
    Ok(NotebookFormat {
        major,
        minor: header.nbformat_minor,
    })
}

/// Detect the notebook format from raw bytes.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<NotebookFormat> {
    let text = std::str::from_utf8(data).map_err(|_| Error::UnknownFormat)?;
    detect_format_from_str(text)
}

/// Detect the notebook format from a file path.
///
/// # Example
/// ```no_run
/// use nbtohtml::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("analysis.ipynb").unwrap();
/// println!("{}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<NotebookFormat> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::NotFound(path.to_path_buf()));
    }
    let data = fs::read(path)?;
    detect_format_from_bytes(&data)
}

/// Enforce the minimum format version.
pub fn check_version(major: u32, minimum: u32) -> Result<()> {
    if major < minimum {
        log::debug!("rejecting nbformat {} (minimum {})", major, minimum);
        return Err(Error::UnsupportedVersion {
            found: major,
            minimum,
        });
    }
    Ok(())
}

/// Check if a file is a Jupyter notebook.
pub fn is_notebook<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_path(path).is_ok()
}

/// Check if bytes hold a Jupyter notebook.
pub fn is_notebook_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}
