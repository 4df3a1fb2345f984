//! Multi-representation output payloads.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::MultilineString;

/// Content types a rich output may carry.
///
/// The set is closed: keys outside it are ignored when decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MimeType {
    /// `text/html`
    Html,
    /// `application/pdf`
    Pdf,
    /// `text/latex`
    Latex,
    /// `image/svg+xml`
    Svg,
    /// `image/png`
    Png,
    /// `image/jpeg`
    Jpeg,
    /// `text/markdown`
    Markdown,
    /// `text/plain`
    PlainText,
}

impl MimeType {
    /// Every content type, highest rendering priority first.
    pub const PRIORITY: [MimeType; 8] = [
        MimeType::Html,
        MimeType::Pdf,
        MimeType::Latex,
        MimeType::Svg,
        MimeType::Png,
        MimeType::Jpeg,
        MimeType::Markdown,
        MimeType::PlainText,
    ];

    /// The MIME string used as key in the notebook document.
    pub fn as_str(&self) -> &'static str {
        match self {
            MimeType::Html => "text/html",
            MimeType::Pdf => "application/pdf",
            MimeType::Latex => "text/latex",
            MimeType::Svg => "image/svg+xml",
            MimeType::Png => "image/png",
            MimeType::Jpeg => "image/jpeg",
            MimeType::Markdown => "text/markdown",
            MimeType::PlainText => "text/plain",
        }
    }

    /// Whether the value is a base64-encoded raster image.
    pub fn is_image(&self) -> bool {
        matches!(self, MimeType::Png | MimeType::Jpeg)
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MimeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MimeType::PRIORITY
            .iter()
            .copied()
            .find(|mime| mime.as_str() == s)
            .ok_or_else(|| format!("unsupported content type: {}", s))
    }
}

/// The `data` mapping of `display_data` and `execute_result` outputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MimeBundle {
    /// HTML fragment
    #[serde(rename = "text/html", default, skip_serializing_if = "Option::is_none")]
    pub html: Option<MultilineString>,

    /// Base64-encoded PDF document
    #[serde(rename = "application/pdf", default, skip_serializing_if = "Option::is_none")]
    pub pdf: Option<MultilineString>,

    /// LaTeX source
    #[serde(rename = "text/latex", default, skip_serializing_if = "Option::is_none")]
    pub latex: Option<MultilineString>,

    /// SVG markup
    #[serde(rename = "image/svg+xml", default, skip_serializing_if = "Option::is_none")]
    pub svg: Option<MultilineString>,

    /// Base64-encoded PNG image
    #[serde(rename = "image/png", default, skip_serializing_if = "Option::is_none")]
    pub png: Option<MultilineString>,

    /// Base64-encoded JPEG image
    #[serde(rename = "image/jpeg", default, skip_serializing_if = "Option::is_none")]
    pub jpeg: Option<MultilineString>,

    /// Markdown source
    #[serde(rename = "text/markdown", default, skip_serializing_if = "Option::is_none")]
    pub markdown: Option<MultilineString>,

    /// Plain text
    #[serde(rename = "text/plain", default, skip_serializing_if = "Option::is_none")]
    pub plain: Option<MultilineString>,
}

impl MimeBundle {
    /// Create an empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the representation stored for a content type.
    pub fn get(&self, mime: MimeType) -> Option<&MultilineString> {
        match mime {
            MimeType::Html => self.html.as_ref(),
            MimeType::Pdf => self.pdf.as_ref(),
            MimeType::Latex => self.latex.as_ref(),
            MimeType::Svg => self.svg.as_ref(),
            MimeType::Png => self.png.as_ref(),
            MimeType::Jpeg => self.jpeg.as_ref(),
            MimeType::Markdown => self.markdown.as_ref(),
            MimeType::PlainText => self.plain.as_ref(),
        }
    }

    /// Set the representation for a content type.
    pub fn with(mut self, mime: MimeType, value: impl Into<MultilineString>) -> Self {
        let slot = match mime {
            MimeType::Html => &mut self.html,
            MimeType::Pdf => &mut self.pdf,
            MimeType::Latex => &mut self.latex,
            MimeType::Svg => &mut self.svg,
            MimeType::Png => &mut self.png,
            MimeType::Jpeg => &mut self.jpeg,
            MimeType::Markdown => &mut self.markdown,
            MimeType::PlainText => &mut self.plain,
        };
        *slot = Some(value.into());
        self
    }

    /// Content types present in this bundle, highest priority first.
    pub fn available(&self) -> impl Iterator<Item = MimeType> + '_ {
        MimeType::PRIORITY
            .into_iter()
            .filter(move |mime| self.get(*mime).is_some())
    }

    /// Check if no known representation is present.
    pub fn is_empty(&self) -> bool {
        self.available().next().is_none()
    }
}
