//! HTML output helpers.

use std::fmt::Write;

/// Escape text for use in HTML content and double-quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Reduce a source name to a token usable inside a class attribute.
///
/// ASCII alphanumerics, `-` and `_` are kept; anything else becomes `-`.
pub(crate) fn class_token(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}

/// Write an anchor, or a plain span when there is no link target.
pub(crate) fn write_link(out: &mut String, href: &str, text: &str, nofollow: bool) {
    if href.is_empty() {
        write!(out, "<span>{}</span>", escape_html(text)).unwrap();
        return;
    }
    let rel = if nofollow { r#" rel="nofollow""# } else { "" };
    write!(
        out,
        r#"<a href="{}"{rel}>{}</a>"#,
        escape_html(href),
        escape_html(text)
    )
    .unwrap();
}
