//! Syntax highlighting via syntect.
//!
//! Highlighted code is emitted with `hl-` prefixed CSS classes instead of
//! inline colors; [`theme_css`] produces the matching stylesheet.

use std::sync::OnceLock;

use syntect::highlighting::ThemeSet;
use syntect::html::{css_for_theme_with_class_style, ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;
use thiserror::Error;

use super::escape::escape_html;
use crate::error::Result;

/// Class style shared by highlighted markup and generated stylesheets.
pub const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed { prefix: "hl-" };

/// Theme used when none is requested.
pub const DEFAULT_THEME: &str = "InspiredGitHub";

/// Errors raised by the highlighter.
#[derive(Debug, Error)]
pub enum HighlightError {
    /// The tokenizer rejected the input
    #[error("Tokenization failed: {0}")]
    Tokenize(String),

    /// Stylesheet generation failed
    #[error("Stylesheet generation failed: {0}")]
    Format(String),

    /// No bundled theme with this name
    #[error("Unknown theme: {0}")]
    UnknownTheme(String),
}

fn syntax_set() -> &'static SyntaxSet {
    static SYNTAXES: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAXES.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn theme_set() -> &'static ThemeSet {
    static THEMES: OnceLock<ThemeSet> = OnceLock::new();
    THEMES.get_or_init(ThemeSet::load_defaults)
}

/// Resolve a language hint to a grammar.
///
/// Tries the hint as a file extension, then as a language name, then sniffs
/// the first line of the source (shebangs, modelines). Falls back to plain
/// text.
fn find_syntax<'a>(syntaxes: &'a SyntaxSet, hint: &str, source: &str) -> &'a SyntaxReference {
    let hint = hint.trim().trim_start_matches('.');
    let by_hint = if hint.is_empty() {
        None
    } else {
        syntaxes
            .find_syntax_by_extension(hint)
            .or_else(|| syntaxes.find_syntax_by_token(hint))
    };

    by_hint
        .or_else(|| syntaxes.find_syntax_by_first_line(source))
        .unwrap_or_else(|| syntaxes.find_syntax_plain_text())
}

/// A code highlighter: `(source, language hint)` to a trusted HTML block.
pub type Highlighter = fn(&str, &str) -> std::result::Result<String, HighlightError>;

/// Highlight source code as a `<pre class="highlight">` block.
///
/// An empty or unrecognized hint still produces a block; the text is just
/// not tokenized.
pub fn highlight(source: &str, language: &str) -> std::result::Result<String, HighlightError> {
    let syntaxes = syntax_set();
    let syntax = find_syntax(syntaxes, language, source);

    let mut generator = ClassedHTMLGenerator::new_with_class_style(syntax, syntaxes, CLASS_STYLE);
    for line in LinesWithEndings::from(source) {
        generator
            .parse_html_for_line_which_includes_newline(line)
            .map_err(|e| HighlightError::Tokenize(e.to_string()))?;
    }

    Ok(format!(
        "<pre class=\"highlight\"><code>{}</code></pre>",
        generator.finalize()
    ))
}

/// Run `highlighter`, falling back to an escaped `<pre>` block.
///
/// Returns the failure alongside the fallback markup so callers can report it.
pub fn highlight_or_escape(
    highlighter: Highlighter,
    source: &str,
    language: &str,
) -> (String, Option<HighlightError>) {
    match highlighter(source, language) {
        Ok(html) => (html, None),
        Err(e) => {
            log::debug!("highlighting as '{}' failed: {}", language, e);
            fallback(source, e)
        }
    }
}

fn fallback(source: &str, error: HighlightError) -> (String, Option<HighlightError>) {
    (format!("<pre>{}</pre>", escape_html(source)), Some(error))
}

/// Stylesheet for highlighted markup in the given theme.
pub fn theme_css(theme: &str) -> Result<String> {
    let theme = theme_set()
        .themes
        .get(theme)
        .ok_or_else(|| HighlightError::UnknownTheme(theme.to_string()))?;

    let css = css_for_theme_with_class_style(theme, CLASS_STYLE)
        .map_err(|e| HighlightError::Format(e.to_string()))?;
    Ok(css)
}

/// Names of the bundled themes, sorted.
pub fn available_themes() -> Vec<&'static str> {
    theme_set().themes.keys().map(String::as_str).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn resolve_language(hint: &str) -> &'static str {
        find_syntax(syntax_set(), hint, "").name.as_str()
    }

    fn failing(_source: &str, _language: &str) -> std::result::Result<String, HighlightError> {
        Err(HighlightError::Tokenize("unbalanced scope".to_string()))
    }

    #[test]
    fn test_highlight_python() {
        let html = highlight("def f(x):\n    return x\n", "python").unwrap();
        assert!(html.starts_with("<pre class=\"highlight\"><code>"));
        assert!(html.ends_with("</code></pre>"));
        assert!(html.contains("hl-"));
        assert!(html.contains("return"));
    }

    #[test]
    fn test_highlight_escapes_markup() {
        let html = highlight("print('<script>')\n", "python").unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_unknown_language_falls_back_to_plain_text() {
        assert_eq!(resolve_language("no-such-language"), "Plain Text");
        let html = highlight("a < b\n", "no-such-language").unwrap();
        assert!(html.contains("a &lt; b"));
    }

    #[test]
    fn test_language_resolution() {
        assert_eq!(resolve_language("py"), "Python");
        assert_eq!(resolve_language(".py"), "Python");
        assert_eq!(resolve_language("python"), "Python");
        assert_eq!(resolve_language(""), "Plain Text");
    }

    #[test]
    fn test_highlight_or_escape_succeeds() {
        let (html, error) = highlight_or_escape(highlight, "x = 1\n", "python");
        assert!(error.is_none());
        assert!(html.starts_with("<pre class=\"highlight\">"));
    }

    #[test]
    fn test_highlight_or_escape_falls_back_on_error() {
        let (html, error) = highlight_or_escape(failing, "a < b", "python");
        assert_eq!(html, "<pre>a &lt; b</pre>");
        assert!(matches!(error, Some(HighlightError::Tokenize(_))));
    }

    #[test]
    fn test_theme_css() {
        let css = theme_css(DEFAULT_THEME).unwrap();
        assert!(css.contains(".hl-"));

        assert!(matches!(
            theme_css("not-a-theme"),
            Err(Error::Highlight(HighlightError::UnknownTheme(_)))
        ));
    }

    #[test]
    fn test_available_themes() {
        let themes = available_themes();
        assert!(themes.contains(&DEFAULT_THEME));
        assert!(themes.windows(2).all(|w| w[0] <= w[1]));
    }
}
