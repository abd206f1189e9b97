//! HTML helper functions

use crate::content::BodyBlock;

/// Render a body block as HTML.
///
/// A block tagged "list-item" renders as a single-item list; every list
/// item keeps its own `<ul>` container, consecutive items are not grouped.
/// Any other type tag renders as a paragraph.
pub fn render_body_block(block: &BodyBlock) -> String {
    let text = escape_html(&block.text);
    if block.kind == "list-item" {
        format!("<ul><li>{}</li></ul>", text)
    } else {
        format!("<p>{}</p>", text)
    }
}

/// Escape HTML special characters
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
