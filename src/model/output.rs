//! Cell output types.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{MimeBundle, MultilineString};

/// Kind of an output record (`output_type`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OutputKind {
    /// Text written to stdout or stderr
    Stream,
    /// Exception with traceback
    Error,
    /// Rich display call
    DisplayData,
    /// Value of the last expression in a cell
    ExecuteResult,
    /// Any other `output_type`, kept verbatim
    Unknown(String),
}

impl OutputKind {
    /// The `output_type` string used in the notebook document.
    pub fn as_str(&self) -> &str {
        match self {
            OutputKind::Stream => "stream",
            OutputKind::Error => "error",
            OutputKind::DisplayData => "display_data",
            OutputKind::ExecuteResult => "execute_result",
            OutputKind::Unknown(name) => name,
        }
    }

    /// CSS class suffix for the output container.
    pub fn css_class(&self) -> &'static str {
        match self {
            OutputKind::Stream => "stream",
            OutputKind::Error => "error",
            OutputKind::DisplayData => "display_data",
            OutputKind::ExecuteResult => "execute_result",
            OutputKind::Unknown(_) => "unknown",
        }
    }
}

impl Default for OutputKind {
    fn default() -> Self {
        OutputKind::Unknown(String::new())
    }
}

impl From<String> for OutputKind {
    fn from(name: String) -> Self {
        match name.as_str() {
            "stream" => OutputKind::Stream,
            "error" => OutputKind::Error,
            "display_data" => OutputKind::DisplayData,
            "execute_result" => OutputKind::ExecuteResult,
            _ => OutputKind::Unknown(name),
        }
    }
}

impl From<OutputKind> for String {
    fn from(kind: OutputKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One result produced by executing a cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    /// Output kind
    #[serde(rename = "output_type", default)]
    pub kind: OutputKind,

    /// Execution count (execute results only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_count: Option<u32>,

    /// Stream name (`stdout`, `stderr`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Stream text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<MultilineString>,

    /// Rich payload for display data and execute results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<MimeBundle>,

    /// Exception name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ename: Option<String>,

    /// Exception value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evalue: Option<String>,

    /// Traceback lines, possibly containing ANSI escape codes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traceback: Option<Vec<String>>,
}

impl Output {
    /// Create a stream output.
    pub fn stream(name: impl Into<String>, text: impl Into<MultilineString>) -> Self {
        Self {
            kind: OutputKind::Stream,
            name: Some(name.into()),
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Create a display data output.
    pub fn display_data(data: MimeBundle) -> Self {
        Self {
            kind: OutputKind::DisplayData,
            data: Some(data),
            ..Default::default()
        }
    }

    /// Create an execute result output.
    pub fn execute_result(execution_count: u32, data: MimeBundle) -> Self {
        Self {
            kind: OutputKind::ExecuteResult,
            execution_count: Some(execution_count),
            data: Some(data),
            ..Default::default()
        }
    }

    /// Create an error output.
    pub fn error<I, S>(ename: impl Into<String>, evalue: impl Into<String>, traceback: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: OutputKind::Error,
            ename: Some(ename.into()),
            evalue: Some(evalue.into()),
            traceback: Some(traceback.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }

    /// Check whether this output carries a raster image.
    pub fn has_image(&self) -> bool {
        self.data
            .as_ref()
            .is_some_and(|data| data.png.is_some() || data.jpeg.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_kind_from_string() {
        assert_eq!(OutputKind::from("stream".to_string()), OutputKind::Stream);
        assert_eq!(
            OutputKind::from("execute_result".to_string()),
            OutputKind::ExecuteResult
        );
        assert_eq!(
            OutputKind::from("pyout".to_string()),
            OutputKind::Unknown("pyout".to_string())
        );
    }

    #[test]
    fn test_decode_stream_output() {
        let json = r#"{"output_type": "stream", "name": "stdout", "text": ["a\n", "b\n"]}"#;
        let output: Output = serde_json::from_str(json).unwrap();
        assert_eq!(output.kind, OutputKind::Stream);
        assert_eq!(output.name.as_deref(), Some("stdout"));
        assert_eq!(output.text.unwrap().joined(), "a\nb\n");
        assert!(output.data.is_none());
        assert!(output.traceback.is_none());
    }

    #[test]
    fn test_decode_missing_fields_are_absent() {
        let output: Output = serde_json::from_str(r#"{"output_type": "error"}"#).unwrap();
        assert_eq!(output.kind, OutputKind::Error);
        assert!(output.traceback.is_none());
        assert!(output.execution_count.is_none());
    }

    #[test]
    fn test_unknown_kind_serializes_verbatim() {
        let output = Output {
            kind: OutputKind::Unknown("pyerr".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&output).unwrap();
        assert_eq!(json, r#"{"output_type":"pyerr"}"#);
    }
}
