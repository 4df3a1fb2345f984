//! HTML assembly for notebooks.
//!
//! Every cell is wrapped in a fixed container structure with CSS class hooks
//! derived from the cell and output kinds:
//!
//! ```text
//! <div class="notebook">
//! <div class="cell cell-code">
//! <div class="input-wrapper">
//! <div class="input-prompt">[1]:</div>
//! <div class="input">...</div>
//! </div>
//! <div class="output-wrapper">
//! <div class="output-prompt">[1]:</div>
//! <div class="output output-execute_result">...</div>
//! </div>
//! </div>
//! </div>
//! ```
//!
//! Prompt containers are always emitted; only their text depends on whether
//! an execution count is present.

use rayon::prelude::*;

use crate::error::Result;
use crate::model::{Cell, Notebook};

use super::cell::render_input;
use super::context::RenderContext;
use super::highlight::{highlight, Highlighter};
use super::output::render_output;
use super::{ConversionStats, Diagnostic, RenderOptions, RenderResult};

/// Convert a notebook to an HTML fragment.
pub fn to_html(notebook: &Notebook, options: &RenderOptions) -> Result<String> {
    let renderer = HtmlRenderer::new(options.clone());
    renderer.render(notebook)
}

/// Convert a notebook to an HTML fragment with diagnostics and statistics.
pub fn to_html_with_report(notebook: &Notebook, options: &RenderOptions) -> Result<RenderResult> {
    let renderer = HtmlRenderer::new(options.clone());
    renderer.render_with_report(notebook)
}

/// Fragments and findings for one cell.
struct RenderedCell {
    html: String,
    diagnostics: Vec<Diagnostic>,
    stats: ConversionStats,
}

/// HTML renderer.
pub struct HtmlRenderer {
    options: RenderOptions,
    highlighter: Highlighter,
}

impl HtmlRenderer {
    /// Create a new HTML renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            highlighter: highlight,
        }
    }

    /// Highlight code cells with a custom highlighter.
    ///
    /// A failing highlighter degrades the cell to escaped text and records a
    /// [`DiagnosticKind::HighlightFailed`](super::DiagnosticKind::HighlightFailed).
    pub fn with_highlighter(mut self, highlighter: Highlighter) -> Self {
        self.highlighter = highlighter;
        self
    }

    /// Render a notebook to HTML.
    pub fn render(&self, notebook: &Notebook) -> Result<String> {
        Ok(self.render_with_report(notebook)?.content)
    }

    /// Render a notebook to HTML, keeping diagnostics and statistics.
    pub fn render_with_report(&self, notebook: &Notebook) -> Result<RenderResult> {
        let language = notebook.language();
        let selected: Vec<(usize, &Cell)> = notebook
            .cells
            .iter()
            .enumerate()
            .filter(|(index, _)| self.options.cell_selection.includes(index + 1))
            .collect();

        // Collecting an indexed parallel iterator keeps document order.
        let rendered: Vec<RenderedCell> = if self.options.parallel {
            selected
                .par_iter()
                .map(|&(index, cell)| self.render_cell(index, cell, &language))
                .collect()
        } else {
            selected
                .iter()
                .map(|&(index, cell)| self.render_cell(index, cell, &language))
                .collect()
        };

        let mut content = String::from("<div class=\"notebook\">\n");
        let mut diagnostics = Vec::new();
        let mut stats = ConversionStats::new();
        for cell in rendered {
            content.push_str(&cell.html);
            diagnostics.extend(cell.diagnostics);
            stats.merge(&cell.stats);
        }
        content.push_str("</div>");

        log::debug!(
            "rendered {} of {} cells ({} diagnostics)",
            stats.cell_count,
            notebook.cell_count(),
            diagnostics.len()
        );
        Ok(RenderResult::new(content, diagnostics, stats))
    }

    fn render_cell(&self, index: usize, cell: &Cell, language: &str) -> RenderedCell {
        let mut diagnostics = Vec::new();
        let mut stats = ConversionStats::new();
        stats.add_cell(cell);

        let mut ctx =
            RenderContext::new(&self.options, language).with_highlighter(self.highlighter);
        let input = render_input(cell, &mut ctx);
        diagnostics.extend(
            ctx.take_issues()
                .into_iter()
                .map(|kind| Diagnostic::for_cell(index, kind)),
        );

        let mut html = String::new();
        html.push_str(&format!(
            "<div class=\"cell cell-{}\">\n",
            cell.kind.css_class()
        ));
        html.push_str("<div class=\"input-wrapper\">\n");
        html.push_str(&format!(
            "<div class=\"input-prompt\">{}</div>\n",
            prompt(cell.execution_count)
        ));
        html.push_str(&format!("<div class=\"input\">{}</div>\n", input));
        html.push_str("</div>\n");

        for (position, output) in cell.outputs.iter().enumerate() {
            stats.add_output(output);
            let fragment = render_output(output, &mut ctx);
            diagnostics.extend(
                ctx.take_issues()
                    .into_iter()
                    .map(|kind| Diagnostic::for_output(index, position, kind)),
            );

            html.push_str("<div class=\"output-wrapper\">\n");
            html.push_str(&format!(
                "<div class=\"output-prompt\">{}</div>\n",
                prompt(output.execution_count)
            ));
            html.push_str(&format!(
                "<div class=\"output output-{}\">{}</div>\n",
                output.kind.css_class(),
                fragment
            ));
            html.push_str("</div>\n");
        }
        html.push_str("</div>\n");

        for diagnostic in &diagnostics {
            log::warn!("{}", diagnostic);
        }
        stats.add_diagnostics(diagnostics.len());

        RenderedCell {
            html,
            diagnostics,
            stats,
        }
    }
}

/// Execution-count prompt text.
fn prompt(execution_count: Option<u32>) -> String {
    match execution_count {
        Some(n) => format!("[{}]:", n),
        None => String::new(),
    }
}
