//! Notebook-level types.

use super::{Cell, CellKind};
use serde::{Deserialize, Serialize};

/// A parsed Jupyter notebook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notebook {
    /// Cells in document order
    #[serde(default)]
    pub cells: Vec<Cell>,

    /// Notebook metadata (kernel, language)
    #[serde(default)]
    pub metadata: Metadata,

    /// Major format version
    #[serde(default)]
    pub nbformat: u32,

    /// Minor format version
    #[serde(default)]
    pub nbformat_minor: u32,
}

impl Notebook {
    /// Create a new empty notebook with the current format version.
    pub fn new() -> Self {
        Self {
            cells: Vec::new(),
            metadata: Metadata::default(),
            nbformat: 4,
            nbformat_minor: 5,
        }
    }

    /// Add a cell to the notebook.
    pub fn add_cell(&mut self, cell: Cell) {
        self.cells.push(cell);
    }

    /// Get a cell by number (1-indexed).
    pub fn get_cell(&self, number: usize) -> Option<&Cell> {
        if number == 0 {
            return None;
        }
        self.cells.get(number - 1)
    }

    /// Get the number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Count cells of a given kind.
    pub fn count_cells(&self, kind: &CellKind) -> usize {
        self.cells.iter().filter(|c| &c.kind == kind).count()
    }

    /// Total number of outputs across all cells.
    pub fn output_count(&self) -> usize {
        self.cells.iter().map(|c| c.outputs.len()).sum()
    }

    /// Check if the notebook has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Format version as `major.minor`.
    pub fn format_version(&self) -> String {
        format!("{}.{}", self.nbformat, self.nbformat_minor)
    }

    /// Language identifier used to pick a syntax highlighter.
    pub fn language(&self) -> String {
        self.metadata.language_hint()
    }
}

/// Notebook metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Kernel specification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kernelspec: Option<KernelSpec>,

    /// Language information reported by the kernel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_info: Option<LanguageInfo>,

    /// Document title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Metadata {
    /// Resolve the language identifier for syntax highlighting.
    ///
    /// Lookup order: the kernel's file extension (without its leading dot),
    /// the kernel's language name, the kernelspec language, the kernelspec
    /// name. Returns an empty string when none is declared.
    pub fn language_hint(&self) -> String {
        let info = self.language_info.as_ref();
        let spec = self.kernelspec.as_ref();

        let candidates = [
            info.and_then(|i| i.file_extension.as_deref())
                .map(|ext| ext.trim_start_matches('.')),
            info.and_then(|i| i.name.as_deref()),
            spec.and_then(|s| s.language.as_deref()),
            spec.and_then(|s| s.name.as_deref()),
        ];

        candidates
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|c| !c.is_empty())
            .unwrap_or_default()
            .to_string()
    }
}

/// Kernel specification (`metadata.kernelspec`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KernelSpec {
    /// Kernel name (e.g., "python3")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Language name (e.g., "python")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Human-readable kernel name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// Kernel language information (`metadata.language_info`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageInfo {
    /// Language name (e.g., "python")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Source file extension (e.g., ".py")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_extension: Option<String>,

    /// MIME type of source files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mimetype: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(
        ext: Option<&str>,
        lang: Option<&str>,
        spec_lang: Option<&str>,
        spec_name: Option<&str>,
    ) -> Metadata {
        Metadata {
            language_info: Some(LanguageInfo {
                name: lang.map(String::from),
                file_extension: ext.map(String::from),
                mimetype: None,
            }),
            kernelspec: Some(KernelSpec {
                name: spec_name.map(String::from),
                language: spec_lang.map(String::from),
                display_name: None,
            }),
            title: None,
        }
    }

    #[test]
    fn test_language_prefers_file_extension() {
        let meta = metadata(Some(".py"), Some("python"), Some("python"), Some("python3"));
        assert_eq!(meta.language_hint(), "py");
    }

    #[test]
    fn test_language_falls_back_in_order() {
        assert_eq!(
            metadata(None, Some("julia"), None, Some("julia-1.9")).language_hint(),
            "julia"
        );
        assert_eq!(metadata(None, None, Some("R"), Some("ir")).language_hint(), "R");
        assert_eq!(metadata(None, None, None, Some("bash")).language_hint(), "bash");
        assert_eq!(metadata(Some(""), None, None, None).language_hint(), "");
    }

    #[test]
    fn test_language_without_metadata() {
        assert_eq!(Metadata::default().language_hint(), "");
    }

    #[test]
    fn test_get_cell_one_indexed() {
        let mut nb = Notebook::new();
        nb.add_cell(Cell::markdown("a"));
        nb.add_cell(Cell::code("b"));
        assert!(nb.get_cell(0).is_none());
        assert_eq!(nb.get_cell(2).unwrap().kind, CellKind::Code);
        assert!(nb.get_cell(3).is_none());
        assert_eq!(nb.count_cells(&CellKind::Markdown), 1);
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let json = r#"{
            "nbformat": 4,
            "nbformat_minor": 2,
            "metadata": {"kernelspec": {"name": "python3", "display_name": "Python 3"}, "widgets": {}},
            "cells": [],
            "extra": true
        }"#;
        let nb: Notebook = serde_json::from_str(json).unwrap();
        assert_eq!(nb.format_version(), "4.2");
        assert_eq!(nb.language(), "python3");
        assert!(nb.is_empty());
    }
}
