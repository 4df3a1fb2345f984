//! # nbtohtml
//!
//! Jupyter notebook to HTML conversion library for Rust.
//!
//! This library reads `.ipynb` documents (nbformat 4 and later) and renders
//! them as a sanitized HTML fragment ready to embed in a page.
//!
//! ## Quick Start
//!
//! ```no_run
//! use nbtohtml::{parse_file, render};
//!
//! fn main() -> nbtohtml::Result<()> {
//!     // Parse a notebook file
//!     let notebook = parse_file("analysis.ipynb")?;
//!
//!     // Convert to HTML
//!     let options = render::RenderOptions::default();
//!     let html = render::to_html(&notebook, &options)?;
//!     println!("{}", html);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Every cell kind**: Markdown, code and raw cells
//! - **Rich outputs**: HTML, SVG, PNG/JPEG, Markdown and plain text, picked by priority
//! - **Safe by default**: Notebook-provided HTML and SVG are sanitized
//! - **Syntax highlighting**: Class-based highlighting with bundled themes
//! - **Terminal colors**: ANSI escape codes in tracebacks become CSS classes
//! - **Parallel processing**: Uses Rayon to render cells concurrently

pub mod convert;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use convert::{
    ConvertOptions, ConvertResult, ConverterRegistry, DocumentConverter, NotebookConverter,
    OutputFormat,
};
pub use detect::{
    detect_format_from_bytes, detect_format_from_path, detect_format_from_str, is_notebook,
    NotebookFormat,
};
pub use error::{Error, Result};
pub use model::{
    Cell, CellKind, KernelSpec, LanguageInfo, Metadata, MimeBundle, MimeType, MultilineString,
    Notebook, Output, OutputKind,
};
pub use parser::{ErrorMode, NotebookParser, ParseOptions};
pub use render::{
    CellSelection, ConversionStats, Diagnostic, DiagnosticKind, JsonFormat, RenderOptions,
    RenderResult,
};

use std::io::Read;
use std::path::Path;

/// Parse a notebook file and return the document model.
///
/// # Arguments
///
/// * `path` - Path to the `.ipynb` file
///
/// # Returns
///
/// A `Result` containing the parsed `Notebook` or an error.
///
/// # Example
///
/// ```no_run
/// use nbtohtml::parse_file;
///
/// let notebook = parse_file("analysis.ipynb").unwrap();
/// println!("Cells: {}", notebook.cell_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Notebook> {
    let parser = NotebookParser::open(path)?;
    parser.parse()
}

/// Parse a notebook file with custom options.
///
/// # Example
///
/// ```no_run
/// use nbtohtml::{parse_file_with_options, ParseOptions};
///
/// let options = ParseOptions::new().lenient();
/// let notebook = parse_file_with_options("analysis.ipynb", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Notebook> {
    let parser = NotebookParser::open_with_options(path, options)?;
    parser.parse()
}

/// Parse a notebook from a JSON string.
pub fn parse_str(text: &str) -> Result<Notebook> {
    NotebookParser::from_text(text).parse()
}

/// Parse a notebook from a JSON string with custom options.
pub fn parse_str_with_options(text: &str, options: ParseOptions) -> Result<Notebook> {
    NotebookParser::from_text_with_options(text, options).parse()
}

/// Parse a notebook from bytes.
///
/// # Example
///
/// ```no_run
/// use nbtohtml::parse_bytes;
///
/// let data = std::fs::read("analysis.ipynb").unwrap();
/// let notebook = parse_bytes(&data).unwrap();
/// ```
pub fn parse_bytes(data: &[u8]) -> Result<Notebook> {
    NotebookParser::from_bytes(data).parse()
}

/// Parse a notebook from bytes with custom options.
pub fn parse_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Notebook> {
    NotebookParser::from_bytes_with_options(data, options).parse()
}

/// Parse a notebook from a reader.
///
/// # Example
///
/// ```no_run
/// use nbtohtml::parse_reader;
/// use std::fs::File;
///
/// let file = File::open("analysis.ipynb").unwrap();
/// let notebook = parse_reader(file).unwrap();
/// ```
pub fn parse_reader<R: Read>(reader: R) -> Result<Notebook> {
    let parser = NotebookParser::from_reader(reader)?;
    parser.parse()
}

/// Parse a notebook from a reader with custom options.
pub fn parse_reader_with_options<R: Read>(reader: R, options: ParseOptions) -> Result<Notebook> {
    let parser = NotebookParser::from_reader_with_options(reader, options)?;
    parser.parse()
}

/// Convert notebook JSON to an HTML fragment.
///
/// # Example
///
/// ```
/// let html = nbtohtml::convert_str(r#"{"nbformat": 4, "cells": []}"#).unwrap();
/// assert_eq!(html, "<div class=\"notebook\">\n</div>");
/// ```
pub fn convert_str(text: &str) -> Result<String> {
    let notebook = parse_str(text)?;
    render::to_html(&notebook, &RenderOptions::default())
}

/// Convert a notebook file to an HTML fragment.
///
/// # Example
///
/// ```no_run
/// use nbtohtml::convert_file;
///
/// let html = convert_file("analysis.ipynb").unwrap();
/// std::fs::write("analysis.html", html).unwrap();
/// ```
pub fn convert_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let notebook = parse_file(path)?;
    render::to_html(&notebook, &RenderOptions::default())
}

/// Convert a notebook file to an HTML fragment with custom options.
pub fn convert_file_with_options<P: AsRef<Path>>(
    path: P,
    options: &ConvertOptions,
) -> Result<ConvertResult> {
    NotebookConverter::new().convert(path.as_ref(), options)
}

/// Convert a notebook file to an HTML fragment without blocking the runtime.
///
/// The file is read through `tokio::fs`; parsing and rendering run on the
/// calling task.
#[cfg(feature = "async")]
pub async fn convert_file_async<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::NotFound(path.to_path_buf()));
    }

    let data = tokio::fs::read(path).await?;
    let notebook = parse_bytes(&data)?;
    render::to_html(&notebook, &RenderOptions::default())
}

/// Convert a notebook file to normalized JSON.
///
/// # Example
///
/// ```no_run
/// use nbtohtml::{to_json, JsonFormat};
///
/// let json = to_json("analysis.ipynb", JsonFormat::Pretty).unwrap();
/// std::fs::write("analysis.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let notebook = parse_file(path)?;
    render::to_json(&notebook, format)
}

/// Builder for parsing and converting notebooks.
///
/// # Example
///
/// ```no_run
/// use nbtohtml::{CellSelection, NbToHtml};
///
/// let html = NbToHtml::new()
///     .lenient()
///     .without_highlighting()
///     .with_cells(CellSelection::Range(1..=10))
///     .parse("analysis.ipynb")?
///     .to_html()?;
/// # Ok::<(), nbtohtml::Error>(())
/// ```
pub struct NbToHtml {
    parse_options: ParseOptions,
    render_options: RenderOptions,
}

impl NbToHtml {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Enable lenient parsing mode.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Disable parallel rendering.
    pub fn sequential(mut self) -> Self {
        self.render_options = self.render_options.sequential();
        self
    }

    /// Render code as escaped text instead of highlighting it.
    pub fn without_highlighting(mut self) -> Self {
        self.render_options = self.render_options.with_highlighting(false);
        self
    }

    /// Set cell selection.
    pub fn with_cells(mut self, cells: CellSelection) -> Self {
        self.render_options = self.render_options.with_cells(cells);
        self
    }

    /// Set the minimum accepted format version.
    pub fn with_min_version(mut self, version: u32) -> Self {
        self.parse_options = self.parse_options.with_min_version(version);
        self
    }

    /// Parse a notebook file and return a result wrapper.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<Converted> {
        let parser = NotebookParser::open_with_options(path, self.parse_options)?;
        let notebook = parser.parse()?;
        Ok(Converted {
            notebook,
            render_options: self.render_options,
        })
    }

    /// Parse a notebook from a JSON string.
    pub fn parse_str(self, text: &str) -> Result<Converted> {
        let parser = NotebookParser::from_text_with_options(text, self.parse_options);
        let notebook = parser.parse()?;
        Ok(Converted {
            notebook,
            render_options: self.render_options,
        })
    }

    /// Parse a notebook from bytes.
    pub fn parse_bytes(self, data: &[u8]) -> Result<Converted> {
        let parser = NotebookParser::from_bytes_with_options(data, self.parse_options);
        let notebook = parser.parse()?;
        Ok(Converted {
            notebook,
            render_options: self.render_options,
        })
    }
}

impl Default for NbToHtml {
    fn default() -> Self {
        Self::new()
    }
}

/// A parsed notebook together with the render options chosen on the builder.
pub struct Converted {
    /// The parsed notebook
    pub notebook: Notebook,
    /// Render options to use
    render_options: RenderOptions,
}

impl Converted {
    /// Convert to an HTML fragment.
    pub fn to_html(&self) -> Result<String> {
        render::to_html(&self.notebook, &self.render_options)
    }

    /// Convert to an HTML fragment with diagnostics and statistics.
    pub fn to_html_with_report(&self) -> Result<RenderResult> {
        render::to_html_with_report(&self.notebook, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.notebook, format)
    }

    /// Get the notebook.
    pub fn notebook(&self) -> &Notebook {
        &self.notebook
    }
}
