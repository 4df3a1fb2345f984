//! Cell input rendering.

use crate::model::{Cell, CellKind};

use super::context::RenderContext;
use super::escape::preformatted;
use super::highlight;
use super::markdown::MarkdownRenderer;
use super::result::DiagnosticKind;

/// Render the input (source) of a cell to an HTML fragment.
pub fn render_input(cell: &Cell, ctx: &mut RenderContext<'_>) -> String {
    let source = cell.source_text();
    match &cell.kind {
        CellKind::Markdown => MarkdownRenderer::new()
            .with_code_highlighting(ctx.options().highlight)
            .render(&source),
        CellKind::Code => render_code(&source, ctx),
        CellKind::Raw => preformatted(&source),
        CellKind::Unknown(kind) => {
            ctx.report(DiagnosticKind::UnknownCellKind(kind.clone()));
            String::new()
        }
    }
}

fn render_code(source: &str, ctx: &mut RenderContext<'_>) -> String {
    if !ctx.options().highlight {
        return preformatted(source);
    }

    let (html, error) =
        highlight::highlight_or_escape(ctx.highlighter(), source, ctx.language());
    if let Some(e) = error {
        ctx.report(DiagnosticKind::HighlightFailed(e.to_string()));
    }
    html
}
