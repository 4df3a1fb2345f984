//! Per-item rendering context.

use super::highlight::{highlight, Highlighter};
use super::options::RenderOptions;
use super::result::DiagnosticKind;

/// State threaded through the cell and output renderers.
///
/// One context covers one cell input or one output, so diagnostics collected
/// here can be attributed to that location afterwards.
#[derive(Debug)]
pub struct RenderContext<'a> {
    options: &'a RenderOptions,
    language: &'a str,
    highlighter: Highlighter,
    issues: Vec<DiagnosticKind>,
}

impl<'a> RenderContext<'a> {
    /// Create a context for the given options and notebook language.
    pub fn new(options: &'a RenderOptions, language: &'a str) -> Self {
        Self {
            options,
            language,
            highlighter: highlight,
            issues: Vec::new(),
        }
    }

    /// Use a different highlighter for code cells.
    pub fn with_highlighter(mut self, highlighter: Highlighter) -> Self {
        self.highlighter = highlighter;
        self
    }

    /// Render options in effect.
    pub fn options(&self) -> &RenderOptions {
        self.options
    }

    /// Notebook language hint used for code cells.
    pub fn language(&self) -> &str {
        self.language
    }

    /// Highlighter for code cells.
    pub fn highlighter(&self) -> Highlighter {
        self.highlighter
    }

    /// Record a recoverable problem.
    pub fn report(&mut self, kind: DiagnosticKind) {
        self.issues.push(kind);
    }

    /// Take the recorded problems, leaving the context empty.
    pub fn take_issues(&mut self) -> Vec<DiagnosticKind> {
        std::mem::take(&mut self.issues)
    }
}
