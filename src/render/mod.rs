//! Rendering module for converting notebooks to HTML and JSON.

mod ansi;
mod cell;
mod context;
mod escape;
mod highlight;
mod html;
mod json;
mod markdown;
mod options;
mod output;
mod result;
mod sanitize;

pub use ansi::{render_line as ansi_to_html, render_lines as traceback_to_html};
pub use cell::render_input;
pub use context::RenderContext;
pub use escape::escape_html;
pub use highlight::{
    available_themes, highlight, highlight_or_escape, theme_css, HighlightError, Highlighter,
    CLASS_STYLE, DEFAULT_THEME,
};
pub use html::{to_html, to_html_with_report, HtmlRenderer};
pub use json::{to_json, JsonFormat};
pub use markdown::{render_markdown, MarkdownRenderer, MARKDOWN_OPTIONS};
pub use options::{CellSelection, RenderOptions};
pub use output::{
    render_bundle, render_output, select_representation, DataRenderer, DataRule, DATA_RENDERERS,
};
pub use result::{ConversionStats, Diagnostic, DiagnosticKind, RenderResult};
pub use sanitize::sanitize_html;
