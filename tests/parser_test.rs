//! Integration tests for notebook parsing.

use std::fs;

use nbtohtml::{
    detect_format_from_path, is_notebook, parse_bytes, parse_file, parse_str,
    parse_str_with_options, CellKind, Error, MimeType, OutputKind, ParseOptions,
};

const FULL: &str = r##"{
    "nbformat": 4,
    "nbformat_minor": 5,
    "metadata": {
        "kernelspec": {"name": "python3", "display_name": "Python 3", "language": "python"},
        "language_info": {"name": "python", "file_extension": ".py", "mimetype": "text/x-python"}
    },
    "cells": [
        {"cell_type": "markdown", "id": "a1", "metadata": {}, "source": ["# Title\n", "text"]},
        {"cell_type": "code", "id": "b2", "execution_count": 3, "metadata": {},
         "source": "import sys",
         "outputs": [
            {"output_type": "stream", "name": "stderr", "text": "warn\n"},
            {"output_type": "display_data", "metadata": {},
             "data": {"image/png": "iVBOR\n", "text/plain": ["<Figure>"],
                      "application/vnd.jupyter.widget-view+json": {"model_id": "x"}}},
            {"output_type": "error", "ename": "ValueError", "evalue": "bad",
             "traceback": ["\u001b[0;31mValueError\u001b[0m: bad"]}
         ]},
        {"cell_type": "raw", "metadata": {}, "source": []}
    ]
}"##;

#[test]
fn test_parse_full_notebook() {
    let notebook = parse_str(FULL).unwrap();

    assert_eq!(notebook.format_version(), "4.5");
    assert_eq!(notebook.cell_count(), 3);
    assert_eq!(notebook.output_count(), 3);
    assert_eq!(notebook.language(), "py");

    let markdown = &notebook.cells[0];
    assert_eq!(markdown.kind, CellKind::Markdown);
    assert_eq!(markdown.source_text(), "# Title\ntext");
    assert_eq!(markdown.id.as_deref(), Some("a1"));

    let code = &notebook.cells[1];
    assert_eq!(code.kind, CellKind::Code);
    assert_eq!(code.execution_count, Some(3));
    assert_eq!(code.outputs[0].kind, OutputKind::Stream);
    assert_eq!(code.outputs[0].name.as_deref(), Some("stderr"));

    let bundle = code.outputs[1].data.as_ref().unwrap();
    assert_eq!(
        bundle.available().collect::<Vec<_>>(),
        vec![MimeType::Png, MimeType::PlainText]
    );
    assert!(code.outputs[1].has_image());

    let error = &code.outputs[2];
    assert_eq!(error.kind, OutputKind::Error);
    assert_eq!(error.ename.as_deref(), Some("ValueError"));
    assert_eq!(error.traceback.as_ref().map(Vec::len), Some(1));

    assert_eq!(notebook.cells[2].kind, CellKind::Raw);
    assert!(notebook.cells[2].source.is_empty());
}

#[test]
fn test_string_and_array_sources_are_equivalent() {
    let as_string = parse_str(
        r#"{"nbformat": 4, "cells": [{"cell_type": "code", "source": "a\nb\n"}]}"#,
    )
    .unwrap();
    let as_array = parse_str(
        r#"{"nbformat": 4, "cells": [{"cell_type": "code", "source": ["a\n", "b\n"]}]}"#,
    )
    .unwrap();

    assert_eq!(
        as_string.cells[0].source_text(),
        as_array.cells[0].source_text()
    );
}

#[test]
fn test_unknown_kinds_are_kept() {
    let notebook = parse_str(
        r#"{"nbformat": 4, "cells": [
            {"cell_type": "heading", "source": "old"},
            {"cell_type": "code", "source": "", "outputs": [{"output_type": "pyout"}]}
        ]}"#,
    )
    .unwrap();

    assert_eq!(notebook.cells[0].kind, CellKind::Unknown("heading".to_string()));
    assert_eq!(
        notebook.cells[1].outputs[0].kind,
        OutputKind::Unknown("pyout".to_string())
    );
}

#[test]
fn test_version_gate() {
    let result = parse_str(r#"{"nbformat": 3, "nbformat_minor": 0, "worksheets": []}"#);
    assert!(matches!(
        result,
        Err(Error::UnsupportedVersion { found: 3, minimum: 4 })
    ));

    let message = result.unwrap_err().to_string();
    assert!(message.contains('3'));
    assert!(message.contains('4'));
}

#[test]
fn test_higher_minimum_version() {
    let options = ParseOptions::new().with_min_version(5);
    let result = parse_str_with_options(FULL, options);
    assert!(matches!(
        result,
        Err(Error::UnsupportedVersion { found: 4, minimum: 5 })
    ));
}

#[test]
fn test_malformed_json() {
    assert!(matches!(parse_bytes(b"{\"nbformat\": 4,"), Err(Error::Json(_))));
    assert!(matches!(parse_bytes(b"\"text\""), Err(Error::Json(_))));
}

#[test]
fn test_lenient_mode_skips_bad_cells() {
    let json = r#"{"nbformat": 4, "cells": [
        {"cell_type": "markdown", "source": "ok"},
        {"cell_type": "code", "source": "x", "outputs": "not-a-list"}
    ]}"#;

    assert!(parse_str(json).is_err());

    let notebook = parse_str_with_options(json, ParseOptions::new().lenient()).unwrap();
    assert_eq!(notebook.cell_count(), 1);
}

#[test]
fn test_parse_file_and_detect() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("full.ipynb");
    fs::write(&path, FULL).unwrap();

    let notebook = parse_file(&path).unwrap();
    assert_eq!(notebook.cell_count(), 3);

    let format = detect_format_from_path(&path).unwrap();
    assert_eq!((format.major, format.minor), (4, 5));
    assert_eq!(format.to_string(), "nbformat 4.5");
    assert!(is_notebook(&path));

    let other = dir.path().join("notes.txt");
    fs::write(&other, "plain text").unwrap();
    assert!(!is_notebook(&other));
}

#[test]
fn test_parse_file_missing() {
    let result = parse_file("/nonexistent/notebook.ipynb");
    assert!(matches!(result, Err(Error::NotFound(_))));
}
