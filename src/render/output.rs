//! Output rendering.
//!
//! Stream and error outputs have fixed renderings. Rich outputs
//! (`display_data`, `execute_result`) pick one representation from their
//! MIME bundle following [`DATA_RENDERERS`].

use crate::model::{MimeBundle, MimeType, MultilineString, Output, OutputKind};

use super::ansi;
use super::context::RenderContext;
use super::escape::{escape_html, preformatted};
use super::markdown::MarkdownRenderer;
use super::result::DiagnosticKind;
use super::sanitize::sanitize_html;

/// Renderer for one representation of a rich output.
pub type DataRenderer = fn(&MultilineString, &mut RenderContext<'_>) -> String;

/// A content type and the renderer used for it.
#[derive(Clone, Copy)]
pub struct DataRule {
    /// Content type handled by this rule
    pub mime: MimeType,
    /// Renderer for the content
    pub render: DataRenderer,
}

/// Rich output renderers in priority order; the first type present in a
/// bundle is the one rendered.
pub static DATA_RENDERERS: [DataRule; 8] = [
    DataRule {
        mime: MimeType::Html,
        render: render_html_data,
    },
    DataRule {
        mime: MimeType::Pdf,
        render: render_pdf_data,
    },
    DataRule {
        mime: MimeType::Latex,
        render: render_latex_data,
    },
    DataRule {
        mime: MimeType::Svg,
        render: render_svg_data,
    },
    DataRule {
        mime: MimeType::Png,
        render: render_png_data,
    },
    DataRule {
        mime: MimeType::Jpeg,
        render: render_jpeg_data,
    },
    DataRule {
        mime: MimeType::Markdown,
        render: render_markdown_data,
    },
    DataRule {
        mime: MimeType::PlainText,
        render: render_plain_data,
    },
];

/// Placeholder for errors that carry no traceback.
const UNKNOWN_ERROR: &str = "<pre>An unknown error occurred</pre>";

/// The rule that applies to a bundle, if any representation is present.
pub fn select_representation(bundle: &MimeBundle) -> Option<&'static DataRule> {
    DATA_RENDERERS
        .iter()
        .find(|rule| bundle.get(rule.mime).is_some())
}

/// Render one output to an HTML fragment.
pub fn render_output(output: &Output, ctx: &mut RenderContext<'_>) -> String {
    match &output.kind {
        OutputKind::Stream => render_stream(output, ctx),
        OutputKind::Error => render_error(output, ctx),
        OutputKind::DisplayData | OutputKind::ExecuteResult => match &output.data {
            Some(bundle) => render_bundle(bundle, ctx),
            None => {
                ctx.report(DiagnosticKind::NoRenderableData);
                String::new()
            }
        },
        OutputKind::Unknown(kind) => {
            ctx.report(DiagnosticKind::UnknownOutputKind(kind.clone()));
            String::new()
        }
    }
}

/// Render the highest-priority representation in a bundle.
pub fn render_bundle(bundle: &MimeBundle, ctx: &mut RenderContext<'_>) -> String {
    let Some(rule) = select_representation(bundle) else {
        ctx.report(DiagnosticKind::NoRenderableData);
        return String::new();
    };

    match bundle.get(rule.mime) {
        Some(value) => (rule.render)(value, ctx),
        None => String::new(),
    }
}

fn render_stream(output: &Output, ctx: &mut RenderContext<'_>) -> String {
    match &output.text {
        Some(text) => preformatted(&text.joined()),
        None => {
            ctx.report(DiagnosticKind::MissingStreamText);
            String::new()
        }
    }
}

fn render_error(output: &Output, ctx: &mut RenderContext<'_>) -> String {
    match &output.traceback {
        Some(lines) => ansi::render_lines(lines),
        None => {
            ctx.report(DiagnosticKind::MissingTraceback);
            UNKNOWN_ERROR.to_string()
        }
    }
}

fn render_html_data(value: &MultilineString, _ctx: &mut RenderContext<'_>) -> String {
    sanitize_html(&value.joined())
}

fn render_pdf_data(_value: &MultilineString, ctx: &mut RenderContext<'_>) -> String {
    ctx.report(DiagnosticKind::UnsupportedContent(MimeType::Pdf));
    "<pre>PDF output</pre>".to_string()
}

fn render_latex_data(_value: &MultilineString, ctx: &mut RenderContext<'_>) -> String {
    ctx.report(DiagnosticKind::UnsupportedContent(MimeType::Latex));
    "<pre>LaTeX output</pre>".to_string()
}

fn render_svg_data(value: &MultilineString, _ctx: &mut RenderContext<'_>) -> String {
    sanitize_html(&value.joined())
}

fn render_png_data(value: &MultilineString, _ctx: &mut RenderContext<'_>) -> String {
    image_tag(MimeType::Png, value)
}

fn render_jpeg_data(value: &MultilineString, _ctx: &mut RenderContext<'_>) -> String {
    image_tag(MimeType::Jpeg, value)
}

fn render_markdown_data(value: &MultilineString, ctx: &mut RenderContext<'_>) -> String {
    MarkdownRenderer::new()
        .with_code_highlighting(ctx.options().highlight)
        .render(&value.joined())
}

fn render_plain_data(value: &MultilineString, _ctx: &mut RenderContext<'_>) -> String {
    preformatted(&value.joined())
}

/// Inline `<img>` for base64 image data. Line breaks inside the payload are
/// removed.
fn image_tag(mime: MimeType, value: &MultilineString) -> String {
    let payload: String = value
        .fragments()
        .iter()
        .flat_map(|fragment| fragment.chars())
        .filter(|c| !c.is_whitespace())
        .collect();
    format!(
        "<img src=\"data:{};base64,{}\">",
        mime.as_str(),
        escape_html(&payload)
    )
}
