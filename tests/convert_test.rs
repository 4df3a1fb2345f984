//! End-to-end conversion tests from notebook JSON to HTML.

use std::fs;

use nbtohtml::render::{sanitize_html, RenderOptions};
use nbtohtml::{
    convert_file, convert_file_with_options, convert_str, CellSelection, ConvertOptions,
    DiagnosticKind, Error, MimeType, NbToHtml,
};

fn notebook(cells: &str) -> String {
    format!(
        r#"{{"nbformat": 4, "nbformat_minor": 5,
            "metadata": {{"language_info": {{"name": "python", "file_extension": ".py"}}}},
            "cells": [{}]}}"#,
        cells
    )
}

fn plain_html(cells: &str) -> String {
    NbToHtml::new()
        .sequential()
        .without_highlighting()
        .parse_str(&notebook(cells))
        .unwrap()
        .to_html()
        .unwrap()
}

#[test]
fn test_empty_notebook() {
    let html = convert_str(r#"{"nbformat": 4, "nbformat_minor": 0, "cells": []}"#).unwrap();
    assert_eq!(html, "<div class=\"notebook\">\n</div>");
}

#[test]
fn test_three_cells_in_document_order() {
    let html = plain_html(
        r##"{"cell_type": "markdown", "source": ["# Title"]},
           {"cell_type": "code", "execution_count": 1, "source": ["x = 1"], "outputs": []},
           {"cell_type": "raw", "source": "<raw>"}"##,
    );

    let expected = "<div class=\"notebook\">\n\
        <div class=\"cell cell-markdown\">\n\
        <div class=\"input-wrapper\">\n\
        <div class=\"input-prompt\"></div>\n\
        <div class=\"input\"><h1>Title</h1>\n</div>\n\
        </div>\n\
        </div>\n\
        <div class=\"cell cell-code\">\n\
        <div class=\"input-wrapper\">\n\
        <div class=\"input-prompt\">[1]:</div>\n\
        <div class=\"input\"><pre>x = 1</pre></div>\n\
        </div>\n\
        </div>\n\
        <div class=\"cell cell-raw\">\n\
        <div class=\"input-wrapper\">\n\
        <div class=\"input-prompt\"></div>\n\
        <div class=\"input\"><pre>&lt;raw&gt;</pre></div>\n\
        </div>\n\
        </div>\n\
        </div>";
    assert_eq!(html, expected);
}

#[test]
fn test_stream_fragments_concatenated() {
    let html = plain_html(
        r#"{"cell_type": "code", "source": "", "outputs": [
            {"output_type": "stream", "name": "stdout", "text": ["a\n", "b\n"]}
        ]}"#,
    );
    assert!(html.contains("<div class=\"output output-stream\"><pre>a\nb\n</pre></div>"));
}

#[test]
fn test_html_preferred_over_plain_text() {
    let html = plain_html(
        r#"{"cell_type": "code", "execution_count": 4, "source": "df", "outputs": [
            {"output_type": "execute_result", "execution_count": 4, "metadata": {},
             "data": {"text/plain": ["   a\n0  1"], "text/html": ["<table>", "<tr><td>1</td></tr>", "</table>"]}}
        ]}"#,
    );
    assert!(html.contains("<div class=\"output-prompt\">[4]:</div>"));
    assert!(html.contains("<table><tbody><tr><td>1</td></tr></tbody></table>"));
    assert!(!html.contains("   a"));
}

#[test]
fn test_script_injection_removed() {
    let html = plain_html(
        r#"{"cell_type": "code", "source": "", "outputs": [
            {"output_type": "display_data", "metadata": {},
             "data": {"text/html": "<p>Hello world</p>\n<script>window.alert('I'm evil!');</script>"}}
        ]}"#,
    );
    assert!(html.contains("<div class=\"output output-display_data\"><p>Hello world</p>\n</div>"));
    assert!(!html.contains("<script"));
    assert!(!html.contains("alert"));
}

#[test]
fn test_markdown_cell_raw_html_omitted() {
    let html = plain_html(
        r#"{"cell_type": "markdown", "source": "Click <img src=x onerror=alert(1)> here"}"#,
    );
    assert!(!html.contains("onerror"));
    assert!(html.contains("<!-- raw HTML omitted -->"));
}

#[test]
fn test_sanitize_idempotent_on_rendered_fragments() {
    let inputs = [
        "<div onclick=\"x()\"><b>bold</b><iframe src=\"https://example.com\"></iframe></div>",
        "<svg viewBox=\"0 0 2 2\"><rect width=\"1\" height=\"1\" fill=\"blue\"></rect></svg>",
        "<a href=\"vbscript:msgbox\">x</a><img src=\"data:image/jpeg;base64,AAAA\">",
    ];
    for input in inputs {
        let once = sanitize_html(input);
        assert_eq!(sanitize_html(&once), once);
    }
}

#[test]
fn test_error_traceback_colors() {
    let html = plain_html(
        r#"{"cell_type": "code", "source": "1/0", "outputs": [
            {"output_type": "error", "ename": "ZeroDivisionError", "evalue": "division by zero",
             "traceback": ["\u001b[0;31mZeroDivisionError\u001b[0m: division by zero"]}
        ]}"#,
    );
    assert!(html.contains(
        "<div class=\"output output-error\"><pre><span class=\"term-fg31\">ZeroDivisionError</span>: division by zero</pre></div>"
    ));
}

#[test]
fn test_png_output() {
    let html = plain_html(
        r#"{"cell_type": "code", "source": "plot()", "outputs": [
            {"output_type": "display_data", "metadata": {},
             "data": {"image/png": "iVBORw0KGgo=\n", "text/plain": ["<Figure size 640x480>"]}}
        ]}"#,
    );
    assert!(html.contains("<img src=\"data:image/png;base64,iVBORw0KGgo=\">"));
    assert!(!html.contains("Figure size"));
}

#[test]
fn test_code_highlighting_uses_notebook_language() {
    let html = NbToHtml::new()
        .parse_str(&notebook(
            r#"{"cell_type": "code", "source": "def f():\n    return 1\n", "outputs": []}"#,
        ))
        .unwrap()
        .to_html()
        .unwrap();
    assert!(html.contains("<pre class=\"highlight\"><code>"));
    assert!(html.contains("hl-"));
}

#[test]
fn test_version_gate() {
    let result = convert_str(r#"{"nbformat": 3, "nbformat_minor": 0, "worksheets": []}"#);
    assert!(matches!(
        result,
        Err(Error::UnsupportedVersion { found: 3, minimum: 4 })
    ));

    let result = convert_str(r#"{"cells": []}"#);
    assert!(matches!(
        result,
        Err(Error::UnsupportedVersion { found: 0, .. })
    ));
}

#[test]
fn test_malformed_json_is_fatal() {
    assert!(matches!(convert_str("{\"cells\": [}"), Err(Error::Json(_))));
}

#[test]
fn test_diagnostics_do_not_abort() {
    let result = NbToHtml::new()
        .parse_str(&notebook(
            r#"{"cell_type": "code", "source": "", "outputs": [
                {"output_type": "display_data", "metadata": {}, "data": {"text/latex": "$x^2$"}},
                {"output_type": "stream", "name": "stdout", "text": "still here"}
            ]}"#,
        ))
        .unwrap()
        .to_html_with_report()
        .unwrap();

    assert!(result.content.contains("<pre>LaTeX output</pre>"));
    assert!(result.content.contains("still here"));
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(
        result.diagnostics[0].kind,
        DiagnosticKind::UnsupportedContent(MimeType::Latex)
    );
    assert_eq!(result.diagnostics[0].output, Some(0));
}

#[test]
fn test_cell_selection() {
    let html = NbToHtml::new()
        .without_highlighting()
        .with_cells(CellSelection::Range(2..=2))
        .parse_str(&notebook(
            r#"{"cell_type": "raw", "source": "one"},
               {"cell_type": "raw", "source": "two"},
               {"cell_type": "raw", "source": "three"}"#,
        ))
        .unwrap()
        .to_html()
        .unwrap();

    assert!(!html.contains("one"));
    assert!(html.contains("<pre>two</pre>"));
    assert!(!html.contains("three"));
}

#[test]
fn test_parallel_matches_sequential() {
    let cells: Vec<String> = (0..40)
        .map(|i| {
            format!(
                r#"{{"cell_type": "code", "execution_count": {i}, "source": "print({i})",
                    "outputs": [{{"output_type": "stream", "name": "stdout", "text": "{i}\n"}}]}}"#
            )
        })
        .collect();
    let parsed = NbToHtml::new().parse_str(&notebook(&cells.join(","))).unwrap();

    let parallel = nbtohtml::render::to_html(&parsed.notebook, &RenderOptions::default()).unwrap();
    let sequential =
        nbtohtml::render::to_html(&parsed.notebook, &RenderOptions::new().sequential()).unwrap();
    assert_eq!(parallel, sequential);
}

#[test]
fn test_convert_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hello.ipynb");
    fs::write(
        &path,
        notebook(r#"{"cell_type": "markdown", "source": "Hello *world*"}"#),
    )
    .unwrap();

    let html = convert_file(&path).unwrap();
    assert!(html.contains("<p>Hello <em>world</em></p>"));

    let result = convert_file_with_options(&path, &ConvertOptions::default()).unwrap();
    assert_eq!(result.content, html);
    assert_eq!(result.metadata.language_info.and_then(|l| l.name).as_deref(), Some("python"));
}

#[test]
fn test_convert_missing_file() {
    let result = convert_file("/nonexistent/hello.ipynb");
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[cfg(feature = "async")]
#[tokio::test]
async fn test_convert_file_async() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("async.ipynb");
    fs::write(&path, notebook(r#"{"cell_type": "raw", "source": "async"}"#)).unwrap();

    let html = nbtohtml::convert_file_async(&path).await.unwrap();
    assert!(html.contains("<pre>async</pre>"));
}

#[test]
fn test_title_stream_and_raw_in_order() {
    let html = convert_str(&notebook(
        r##"{"cell_type": "markdown", "source": "# Title"},
           {"cell_type": "code", "source": "print('hello')", "outputs": [
               {"output_type": "stream", "name": "stdout", "text": "hello\n"}]},
           {"cell_type": "raw", "source": "plain"}"##,
    ))
    .unwrap();

    let title = html.find("<h1>Title</h1>").unwrap();
    let code_cell = html.find("<div class=\"cell cell-code\">").unwrap();
    let stream = html.find("<pre>hello\n</pre>").unwrap();
    let raw_cell = html.find("<div class=\"cell cell-raw\">").unwrap();
    let raw = html.find("<pre>plain</pre>").unwrap();
    assert!(title < code_cell && code_cell < stream && stream < raw_cell && raw_cell < raw);
}

#[test]
fn test_script_in_text_payloads_is_escaped() {
    let html = plain_html(
        r#"{"cell_type": "raw", "source": "<script>alert(1)</script>"},
           {"cell_type": "code", "source": "", "outputs": [
               {"output_type": "stream", "name": "stdout", "text": "<script>alert(2)</script>"},
               {"output_type": "execute_result", "execution_count": 1, "metadata": {},
                "data": {"text/plain": "<script>alert(3)</script>"}}]}"#,
    );
    assert!(!html.contains("<script"));
    assert_eq!(html.matches("&lt;script&gt;").count(), 3);
}
