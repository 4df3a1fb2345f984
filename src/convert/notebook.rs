//! Jupyter notebook converter implementation.

use crate::error::Result;
use crate::model::Notebook;
use crate::parser::NotebookParser;
use crate::render::{to_html_with_report, to_json, JsonFormat};
use std::path::Path;

use super::{ConvertOptions, ConvertResult, DocumentConverter, OutputFormat};

/// Jupyter notebook converter.
///
/// Converts `.ipynb` documents to an HTML fragment or to normalized JSON.
#[derive(Debug, Clone, Default)]
pub struct NotebookConverter {
    _private: (),
}

impl NotebookConverter {
    /// Create a new notebook converter.
    pub fn new() -> Self {
        Self { _private: () }
    }

    fn convert_notebook(
        &self,
        notebook: Notebook,
        options: &ConvertOptions,
    ) -> Result<ConvertResult> {
        let format = options.output_format;
        match format {
            OutputFormat::Html => {
                let report = to_html_with_report(&notebook, &options.render)?;
                Ok(ConvertResult::from_report(report, notebook.metadata))
            }
            OutputFormat::Json => {
                let content = to_json(&notebook, JsonFormat::Pretty)?;
                Ok(ConvertResult::new(content, notebook.metadata)
                    .with_mime_type(format.mime_type()))
            }
        }
    }
}

impl DocumentConverter for NotebookConverter {
    fn supported_extensions(&self) -> &[&str] {
        &["ipynb"]
    }

    fn name(&self) -> &str {
        "notebook"
    }

    fn convert(&self, path: &Path, options: &ConvertOptions) -> Result<ConvertResult> {
        let parser = NotebookParser::open_with_options(path, options.parse.clone())?;
        let notebook = parser.parse()?;
        self.convert_notebook(notebook, options)
    }

    fn convert_bytes(&self, bytes: &[u8], options: &ConvertOptions) -> Result<ConvertResult> {
        let parser = NotebookParser::from_bytes_with_options(bytes, options.parse.clone());
        let notebook = parser.parse()?;
        self.convert_notebook(notebook, options)
    }
}
