//! HTML escaping for text that must render literally.

/// Escape HTML special characters for safe embedding in element content.
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape text and wrap it in a `<pre>` block.
pub fn preformatted(text: &str) -> String {
    format!("<pre>{}</pre>", escape_html(text))
}
