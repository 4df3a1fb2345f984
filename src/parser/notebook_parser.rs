//! Notebook document parser using serde_json.

use std::fs;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::detect::check_version;
use crate::error::{Error, Result};
use crate::model::{Cell, Metadata, Notebook};

use super::options::{ErrorMode, ParseOptions};

/// Notebook document parser.
///
/// Holds the serialized document; [`NotebookParser::parse`] decodes it into a
/// [`Notebook`] and applies the format version gate.
pub struct NotebookParser {
    data: Vec<u8>,
    options: ParseOptions,
}

/// Loosely typed notebook used by lenient mode so that each cell decodes on
/// its own.
#[derive(Deserialize)]
struct LooseNotebook {
    #[serde(default)]
    cells: Vec<Value>,
    #[serde(default)]
    metadata: Value,
    #[serde(default)]
    nbformat: u32,
    #[serde(default)]
    nbformat_minor: u32,
}

impl NotebookParser {
    /// Open a notebook file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a notebook file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::NotFound(path.to_path_buf()));
        }

        let data = fs::read(path)?;
        log::debug!("read {} bytes from {}", data.len(), path.display());
        Ok(Self { data, options })
    }

    /// Create a parser for an in-memory JSON string.
    pub fn from_text(text: &str) -> Self {
        Self::from_text_with_options(text, ParseOptions::default())
    }

    /// Create a parser for an in-memory JSON string with custom options.
    pub fn from_text_with_options(text: &str, options: ParseOptions) -> Self {
        Self {
            data: text.as_bytes().to_vec(),
            options,
        }
    }

    /// Create a parser for raw bytes.
    pub fn from_bytes(data: &[u8]) -> Self {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Create a parser for raw bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Self {
        Self {
            data: data.to_vec(),
            options,
        }
    }

    /// Create a parser by draining a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Create a parser by draining a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Ok(Self { data, options })
    }

    /// Get the parse options.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Decode the document and enforce the minimum format version.
    pub fn parse(&self) -> Result<Notebook> {
        let notebook = match self.options.error_mode {
            ErrorMode::Strict => serde_json::from_slice::<Notebook>(&self.data)?,
            ErrorMode::Lenient => self.parse_lenient()?,
        };

        check_version(notebook.nbformat, self.options.min_version)?;

        log::debug!(
            "parsed notebook (nbformat {}, {} cells)",
            notebook.format_version(),
            notebook.cell_count()
        );
        Ok(notebook)
    }

    fn parse_lenient(&self) -> Result<Notebook> {
        let loose: LooseNotebook = serde_json::from_slice(&self.data)?;

        let metadata = if loose.metadata.is_null() {
            Metadata::default()
        } else {
            serde_json::from_value(loose.metadata).unwrap_or_else(|e| {
                log::warn!("ignoring malformed notebook metadata: {}", e);
                Metadata::default()
            })
        };

        let total = loose.cells.len();
        let cells: Vec<Cell> = loose
            .cells
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value::<Cell>(value) {
                Ok(cell) => Some(cell),
                Err(e) => {
                    log::warn!("skipping malformed cell {}: {}", index + 1, e);
                    None
                }
            })
            .collect();

        if cells.len() < total {
            log::warn!("skipped {} of {} cells", total - cells.len(), total);
        }

        Ok(Notebook {
            cells,
            metadata,
            nbformat: loose.nbformat,
            nbformat_minor: loose.nbformat_minor,
        })
    }
}
