//! Converters from input documents to rendered output.
//!
//! A [`ConverterRegistry`] picks a [`DocumentConverter`] by file extension
//! (or by name) and runs it with a [`ConvertOptions`] bundle. Notebooks are
//! handled by [`NotebookConverter`], which [`ConverterRegistry::with_defaults`]
//! registers.
//!
//! # Example
//!
//! ```no_run
//! use nbtohtml::convert::{ConvertOptions, ConverterRegistry, OutputFormat};
//! use std::path::Path;
//!
//! fn main() -> nbtohtml::Result<()> {
//!     let registry = ConverterRegistry::with_defaults();
//!     let options = ConvertOptions::new().with_format(OutputFormat::Html);
//!
//!     let result = registry.convert(Path::new("analysis.ipynb"), &options)?;
//!     for diagnostic in &result.diagnostics {
//!         eprintln!("{}", diagnostic);
//!     }
//!     println!("{}", result.content);
//!     Ok(())
//! }
//! ```

mod notebook;

pub use notebook::NotebookConverter;

use crate::error::{Error, Result};
use crate::model::Metadata;
use crate::parser::ParseOptions;
use crate::render::{ConversionStats, Diagnostic, RenderOptions, RenderResult};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Everything a conversion needs: how to parse, how to render, what to emit.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Parsing options
    pub parse: ParseOptions,

    /// Rendering options (HTML output)
    pub render: RenderOptions,

    /// Output format
    pub output_format: OutputFormat,
}

impl ConvertOptions {
    /// Create conversion options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the parsing options.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse = options;
        self
    }

    /// Replace the rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Choose the output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }
}

/// What a converter produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Sanitized HTML fragment
    #[default]
    Html,

    /// The decoded document model as JSON
    Json,
}

impl OutputFormat {
    /// MIME type of content in this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Html => "text/html",
            OutputFormat::Json => "application/json",
        }
    }
}

/// Converted content plus what was learned along the way.
#[derive(Debug, Clone)]
pub struct ConvertResult {
    /// Converted content
    pub content: String,

    /// Metadata of the source notebook
    pub metadata: Metadata,

    /// Recoverable problems found while rendering
    pub diagnostics: Vec<Diagnostic>,

    /// Rendering statistics; only HTML conversions gather them
    pub stats: Option<ConversionStats>,

    /// MIME type of `content`
    pub mime_type: &'static str,
}

impl ConvertResult {
    /// Wrap content as an HTML result with no diagnostics.
    pub fn new(content: String, metadata: Metadata) -> Self {
        Self {
            content,
            metadata,
            diagnostics: Vec::new(),
            stats: None,
            mime_type: OutputFormat::Html.mime_type(),
        }
    }

    /// Build an HTML result from a render report.
    pub fn from_report(report: RenderResult, metadata: Metadata) -> Self {
        Self::new(report.content, metadata)
            .with_diagnostics(report.diagnostics)
            .with_stats(report.stats)
    }

    /// Attach diagnostics.
    pub fn with_diagnostics(mut self, diagnostics: Vec<Diagnostic>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Attach statistics.
    pub fn with_stats(mut self, stats: ConversionStats) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Override the MIME type.
    pub fn with_mime_type(mut self, mime_type: &'static str) -> Self {
        self.mime_type = mime_type;
        self
    }

    /// Content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }

    /// True when nothing was degraded during rendering.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// An input format the registry can dispatch to.
pub trait DocumentConverter: Send + Sync {
    /// Lowercase extensions without the leading dot, e.g. `["ipynb"]`.
    fn supported_extensions(&self) -> &[&str];

    /// Unique converter name.
    fn name(&self) -> &str;

    /// Convert the file at `path`.
    fn convert(&self, path: &Path, options: &ConvertOptions) -> Result<ConvertResult>;

    /// Convert an in-memory document.
    fn convert_bytes(&self, bytes: &[u8], options: &ConvertOptions) -> Result<ConvertResult>;

    /// Convert an in-memory document held as text.
    fn convert_str(&self, text: &str, options: &ConvertOptions) -> Result<ConvertResult> {
        self.convert_bytes(text.as_bytes(), options)
    }

    /// Whether `ext` is handled here (case-insensitive).
    fn supports_extension(&self, ext: &str) -> bool {
        self.supported_extensions()
            .iter()
            .any(|e| e.eq_ignore_ascii_case(ext))
    }
}

/// Converters indexed by extension and by name.
///
/// A converter registered later wins for any extension it shares with an
/// earlier one.
pub struct ConverterRegistry {
    converters: Vec<Arc<dyn DocumentConverter>>,
    extensions: HashMap<String, usize>,
}

impl ConverterRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            converters: Vec::new(),
            extensions: HashMap::new(),
        }
    }

    /// Create a registry that handles Jupyter notebooks.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(NotebookConverter::new()));
        registry
    }

    /// Register a converter for all of its extensions.
    pub fn register(&mut self, converter: Arc<dyn DocumentConverter>) {
        let slot = self.converters.len();
        for ext in converter.supported_extensions() {
            self.extensions.insert(ext.to_ascii_lowercase(), slot);
        }
        log::debug!(
            "registered converter '{}' for {:?}",
            converter.name(),
            converter.supported_extensions()
        );
        self.converters.push(converter);
    }

    /// Converter for a file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn DocumentConverter>> {
        self.extensions
            .get(&ext.to_ascii_lowercase())
            .map(|&slot| Arc::clone(&self.converters[slot]))
    }

    /// Converter by name (case-insensitive).
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn DocumentConverter>> {
        self.converters
            .iter()
            .rev()
            .find(|c| c.name().eq_ignore_ascii_case(name))
            .cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.extensions.contains_key(&ext.to_ascii_lowercase())
    }

    /// All supported extensions, in no particular order.
    pub fn supported_extensions(&self) -> Vec<&str> {
        self.extensions.keys().map(String::as_str).collect()
    }

    fn require(&self, ext: &str) -> Result<Arc<dyn DocumentConverter>> {
        self.get_by_extension(ext)
            .ok_or_else(|| Error::Other(format!("No converter registered for '.{}' files", ext)))
    }

    /// Convert a file, choosing the converter from its extension.
    pub fn convert(&self, path: &Path, options: &ConvertOptions) -> Result<ConvertResult> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| {
                Error::Other(format!("Cannot pick a converter for {}: no extension", path.display()))
            })?;

        self.require(ext)?.convert(path, options)
    }

    /// Convert an in-memory document of the given extension.
    pub fn convert_bytes(
        &self,
        bytes: &[u8],
        ext: &str,
        options: &ConvertOptions,
    ) -> Result<ConvertResult> {
        self.require(ext)?.convert_bytes(bytes, options)
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
