//! Inline `<doc ...>` header rendering.

use bibmeta_resolve::Record;
use std::borrow::Cow;

/// Separator between list entries in a header attribute.
pub const HEADER_LIST_SEPARATOR: &str = "|";

/// Render a record as a `<doc field="value" ...>` tag.
///
/// Fields appear in [`FIELDS`](bibmeta_resolve::FIELDS) order; unset scalars
/// and empty lists are left out. List entries are joined with `|` before
/// escaping.
pub fn format_header(record: &Record) -> String {
    let attributes = record
        .fields()
        .map(|(name, field)| format!("{name}=\"{}\"", escape(&field.join(HEADER_LIST_SEPARATOR))))
        .collect::<Vec<_>>();
    format!("<doc {}>", attributes.join(" "))
}

/// Escape `&`, `<`, `>`, `"` and `'` for use inside an HTML attribute.
pub fn escape(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len() + 16);
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
