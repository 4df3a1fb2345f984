//! Markdown to HTML rendering via pulldown-cmark.
//!
//! Raw HTML in markdown sources is never passed through: blocks and inline
//! tags are replaced by a `<!-- raw HTML omitted -->` marker. Link and image
//! destinations using script-capable schemes are emptied, and fenced code
//! blocks are syntax-highlighted.

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};

use super::escape::escape_html;
use super::highlight;
use super::sanitize::is_data_image_url;

/// Extensions enabled for every document: GitHub tables, strikethrough,
/// task lists, footnotes and `$`/`$$` math spans.
pub const MARKDOWN_OPTIONS: Options = Options::ENABLE_TABLES
    .union(Options::ENABLE_STRIKETHROUGH)
    .union(Options::ENABLE_TASKLISTS)
    .union(Options::ENABLE_FOOTNOTES)
    .union(Options::ENABLE_MATH);

const RAW_HTML_OMITTED: &str = "<!-- raw HTML omitted -->";

const BLOCKED_SCHEMES: &[&str] = &["javascript:", "vbscript:", "file:"];

/// Convert markdown text to an HTML fragment with default settings.
pub fn render_markdown(text: &str) -> String {
    MarkdownRenderer::new().render(text)
}

/// Markdown renderer.
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    highlight_code: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer.
    pub fn new() -> Self {
        Self {
            highlight_code: true,
        }
    }

    /// Enable or disable highlighting of fenced code blocks.
    pub fn with_code_highlighting(mut self, highlight: bool) -> Self {
        self.highlight_code = highlight;
        self
    }

    /// Render markdown text to HTML.
    pub fn render(&self, text: &str) -> String {
        let parser = Parser::new_ext(text, MARKDOWN_OPTIONS);
        let events = SafeEvents {
            inner: parser,
            highlight_code: self.highlight_code,
        };

        let mut output = String::with_capacity(text.len() + text.len() / 2);
        html::push_html(&mut output, events);
        output
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a link destination may be emitted as-is.
fn is_safe_destination(url: &str, is_image: bool) -> bool {
    // Browsers ignore whitespace and control characters inside a scheme.
    let compact: String = url
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .flat_map(char::to_lowercase)
        .collect();

    if BLOCKED_SCHEMES.iter().any(|scheme| compact.starts_with(scheme)) {
        return false;
    }
    if compact.starts_with("data:") {
        return is_image && is_data_image_url(&compact);
    }
    true
}

fn safe_destination(url: CowStr<'_>, is_image: bool) -> CowStr<'_> {
    if is_safe_destination(&url, is_image) {
        url
    } else {
        log::debug!("dropping unsafe markdown link destination");
        CowStr::Borrowed("")
    }
}

/// Event filter applied between the parser and the HTML writer.
struct SafeEvents<'a, I: Iterator<Item = Event<'a>>> {
    inner: I,
    highlight_code: bool,
}

impl<'a, I: Iterator<Item = Event<'a>>> SafeEvents<'a, I> {
    fn skip_html_block(&mut self) {
        for event in self.inner.by_ref() {
            if matches!(event, Event::End(TagEnd::HtmlBlock)) {
                break;
            }
        }
    }

    fn highlighted_code_block(&mut self, kind: CodeBlockKind<'a>) -> Event<'a> {
        let mut code = String::new();
        for event in self.inner.by_ref() {
            match event {
                Event::Text(text) => code.push_str(&text),
                Event::End(TagEnd::CodeBlock) => break,
                _ => {}
            }
        }

        let language = match &kind {
            CodeBlockKind::Fenced(info) => info.split_whitespace().next().unwrap_or(""),
            CodeBlockKind::Indented => "",
        };

        let html = if language.is_empty() {
            format!("<pre><code>{}</code></pre>\n", escape_html(&code))
        } else {
            match highlight::highlight(&code, language) {
                Ok(html) => format!("{}\n", html),
                Err(e) => {
                    log::debug!("markdown code block not highlighted: {}", e);
                    format!(
                        "<pre><code class=\"language-{}\">{}</code></pre>\n",
                        escape_html(language),
                        escape_html(&code)
                    )
                }
            }
        };
        Event::Html(CowStr::from(html))
    }
}

impl<'a, I: Iterator<Item = Event<'a>>> Iterator for SafeEvents<'a, I> {
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Event<'a>> {
        let event = self.inner.next()?;
        let event = match event {
            Event::Start(Tag::HtmlBlock) => {
                self.skip_html_block();
                Event::Html(CowStr::Borrowed("<!-- raw HTML omitted -->\n"))
            }
            Event::Html(_) => Event::Html(CowStr::Borrowed(RAW_HTML_OMITTED)),
            Event::InlineHtml(_) => Event::InlineHtml(CowStr::Borrowed(RAW_HTML_OMITTED)),
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                id,
            }) => Event::Start(Tag::Link {
                link_type,
                dest_url: safe_destination(dest_url, false),
                title,
                id,
            }),
            Event::Start(Tag::Image {
                link_type,
                dest_url,
                title,
                id,
            }) => Event::Start(Tag::Image {
                link_type,
                dest_url: safe_destination(dest_url, true),
                title,
                id,
            }),
            Event::Start(Tag::CodeBlock(kind)) if self.highlight_code => {
                self.highlighted_code_block(kind)
            }
            other => other,
        };
        Some(event)
    }
}
