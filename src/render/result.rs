//! Rendering result with diagnostics and statistics.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{Cell, CellKind, MimeType, Output, OutputKind};

/// Result of rendering a notebook, including content, diagnostics and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered HTML fragment
    pub content: String,

    /// Recoverable problems found while rendering, in document order
    pub diagnostics: Vec<Diagnostic>,

    /// Conversion statistics
    pub stats: ConversionStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, diagnostics: Vec<Diagnostic>, stats: ConversionStats) -> Self {
        Self {
            content,
            diagnostics,
            stats,
        }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }

    /// Whether rendering finished without diagnostics.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// A recoverable rendering problem.
///
/// These never abort a conversion; the affected fragment renders as an
/// empty string or a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Cell type outside markdown/code/raw
    UnknownCellKind(String),
    /// Output type outside stream/error/display_data/execute_result
    UnknownOutputKind(String),
    /// Content type that renders as a placeholder
    UnsupportedContent(MimeType),
    /// Rich output with no known representation
    NoRenderableData,
    /// Stream output without text
    MissingStreamText,
    /// Error output without traceback
    MissingTraceback,
    /// Highlighter failure; the code was emitted as escaped text
    HighlightFailed(String),
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::UnknownCellKind(kind) => write!(f, "unknown cell type '{}'", kind),
            DiagnosticKind::UnknownOutputKind(kind) => {
                write!(f, "unknown output type '{}'", kind)
            }
            DiagnosticKind::UnsupportedContent(mime) => {
                write!(f, "{} output rendered as placeholder", mime)
            }
            DiagnosticKind::NoRenderableData => write!(f, "no renderable data in output"),
            DiagnosticKind::MissingStreamText => write!(f, "stream output has no text"),
            DiagnosticKind::MissingTraceback => write!(f, "error output has no traceback"),
            DiagnosticKind::HighlightFailed(reason) => {
                write!(f, "syntax highlighting failed: {}", reason)
            }
        }
    }
}

/// A diagnostic together with its location in the notebook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Cell index (0-based)
    pub cell: usize,

    /// Output index within the cell (0-based), `None` for the cell input
    pub output: Option<usize>,

    /// What went wrong
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    /// Create a diagnostic attached to a cell input.
    pub fn for_cell(cell: usize, kind: DiagnosticKind) -> Self {
        Self {
            cell,
            output: None,
            kind,
        }
    }

    /// Create a diagnostic attached to one output of a cell.
    pub fn for_output(cell: usize, output: usize, kind: DiagnosticKind) -> Self {
        Self {
            cell,
            output: Some(output),
            kind,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.output {
            Some(output) => write!(f, "cell {}, output {}: {}", self.cell + 1, output + 1, self.kind),
            None => write!(f, "cell {}: {}", self.cell + 1, self.kind),
        }
    }
}

/// Statistics collected during conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Number of cells rendered
    pub cell_count: u32,

    /// Number of markdown cells
    pub markdown_cells: u32,

    /// Number of code cells
    pub code_cells: u32,

    /// Number of raw cells
    pub raw_cells: u32,

    /// Number of cells with an unknown type
    pub unknown_cells: u32,

    /// Number of outputs rendered
    pub output_count: u32,

    /// Number of image outputs
    pub image_count: u32,

    /// Number of error outputs
    pub error_count: u32,

    /// Number of diagnostics raised
    pub diagnostic_count: u32,
}

impl ConversionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one cell by kind.
    pub fn add_cell(&mut self, cell: &Cell) {
        self.cell_count += 1;
        match cell.kind {
            CellKind::Markdown => self.markdown_cells += 1,
            CellKind::Code => self.code_cells += 1,
            CellKind::Raw => self.raw_cells += 1,
            CellKind::Unknown(_) => self.unknown_cells += 1,
        }
    }

    /// Count one output.
    pub fn add_output(&mut self, output: &Output) {
        self.output_count += 1;
        if output.has_image() {
            self.image_count += 1;
        }
        if output.kind == OutputKind::Error {
            self.error_count += 1;
        }
    }

    /// Count diagnostics.
    pub fn add_diagnostics(&mut self, count: usize) {
        self.diagnostic_count += count as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ConversionStats) {
        self.cell_count += other.cell_count;
        self.markdown_cells += other.markdown_cells;
        self.code_cells += other.code_cells;
        self.raw_cells += other.raw_cells;
        self.unknown_cells += other.unknown_cells;
        self.output_count += other.output_count;
        self.image_count += other.image_count;
        self.error_count += other.error_count;
        self.diagnostic_count += other.diagnostic_count;
    }
}
