//! Cell types.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{MultilineString, Output};

/// Kind of a notebook cell (`cell_type`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CellKind {
    /// Narrative Markdown text
    Markdown,
    /// Executable source code
    Code,
    /// Unformatted text, rendered literally
    Raw,
    /// Any other `cell_type`, kept verbatim
    Unknown(String),
}

impl CellKind {
    /// The `cell_type` string used in the notebook document.
    pub fn as_str(&self) -> &str {
        match self {
            CellKind::Markdown => "markdown",
            CellKind::Code => "code",
            CellKind::Raw => "raw",
            CellKind::Unknown(name) => name,
        }
    }

    /// CSS class suffix for the cell container.
    pub fn css_class(&self) -> &'static str {
        match self {
            CellKind::Markdown => "markdown",
            CellKind::Code => "code",
            CellKind::Raw => "raw",
            CellKind::Unknown(_) => "unknown",
        }
    }
}

impl Default for CellKind {
    fn default() -> Self {
        CellKind::Unknown(String::new())
    }
}

impl From<String> for CellKind {
    fn from(name: String) -> Self {
        match name.as_str() {
            "markdown" => CellKind::Markdown,
            "code" => CellKind::Code,
            "raw" => CellKind::Raw,
            _ => CellKind::Unknown(name),
        }
    }
}

impl From<CellKind> for String {
    fn from(kind: CellKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single notebook cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Cell kind
    #[serde(rename = "cell_type", default)]
    pub kind: CellKind,

    /// Cell identifier (nbformat 4.5+)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Execution count for code cells
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_count: Option<u32>,

    /// Source text fragments
    #[serde(default)]
    pub source: MultilineString,

    /// Outputs produced by the last execution
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outputs: Vec<Output>,
}

impl Cell {
    /// Create a cell of the given kind.
    pub fn new(kind: CellKind, source: impl Into<MultilineString>) -> Self {
        Self {
            kind,
            source: source.into(),
            ..Default::default()
        }
    }

    /// Create a Markdown cell.
    pub fn markdown(source: impl Into<MultilineString>) -> Self {
        Self::new(CellKind::Markdown, source)
    }

    /// Create a code cell.
    pub fn code(source: impl Into<MultilineString>) -> Self {
        Self::new(CellKind::Code, source)
    }

    /// Create a raw cell.
    pub fn raw(source: impl Into<MultilineString>) -> Self {
        Self::new(CellKind::Raw, source)
    }

    /// Set the execution count.
    pub fn with_execution_count(mut self, count: u32) -> Self {
        self.execution_count = Some(count);
        self
    }

    /// Append an output.
    pub fn with_output(mut self, output: Output) -> Self {
        self.outputs.push(output);
        self
    }

    /// Concatenated source text.
    pub fn source_text(&self) -> String {
        self.source.joined()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_kind_from_string() {
        assert_eq!(CellKind::from("markdown".to_string()), CellKind::Markdown);
        assert_eq!(CellKind::from("code".to_string()), CellKind::Code);
        assert_eq!(CellKind::from("raw".to_string()), CellKind::Raw);
        assert_eq!(
            CellKind::from("heading".to_string()),
            CellKind::Unknown("heading".to_string())
        );
    }

    #[test]
    fn test_css_class_never_leaks_unknown_name() {
        let kind = CellKind::Unknown("x\" onclick=\"alert(1)".to_string());
        assert_eq!(kind.css_class(), "unknown");
    }

    #[test]
    fn test_decode_code_cell() {
        let json = r#"{
            "cell_type": "code",
            "execution_count": 3,
            "metadata": {"collapsed": true},
            "source": ["import os\n", "print(os.name)"],
            "outputs": [{"output_type": "stream", "name": "stdout", "text": "posix\n"}]
        }"#;
        let cell: Cell = serde_json::from_str(json).unwrap();
        assert_eq!(cell.kind, CellKind::Code);
        assert_eq!(cell.execution_count, Some(3));
        assert_eq!(cell.source_text(), "import os\nprint(os.name)");
        assert_eq!(cell.outputs.len(), 1);
    }

    #[test]
    fn test_decode_markdown_cell_without_outputs() {
        let json = r##"{"cell_type": "markdown", "metadata": {}, "source": "# Title"}"##;
        let cell: Cell = serde_json::from_str(json).unwrap();
        assert_eq!(cell.kind, CellKind::Markdown);
        assert!(cell.execution_count.is_none());
        assert!(cell.outputs.is_empty());
    }

    #[test]
    fn test_builder() {
        let cell = Cell::code("x = 1")
            .with_execution_count(7)
            .with_output(Output::stream("stdout", "1\n"));
        assert_eq!(cell.execution_count, Some(7));
        assert_eq!(cell.outputs.len(), 1);
    }
}
