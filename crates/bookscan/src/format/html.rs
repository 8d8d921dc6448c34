//! HTML composition for result table rows. Every value is escaped before it is placed in
//! markup; book metadata comes from remote services and is never trusted as markup.

use std::borrow::Cow;

use crate::BookRecord;

/// Escapes `value` for use as HTML text or a quoted attribute value.
#[must_use]
pub fn escape(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len() + 16);
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// A single `<tr>` with one `<td>` per column, in column order.
#[must_use]
pub fn compose_row(record: &BookRecord) -> String {
    let cells = record
        .cells()
        .iter()
        .map(|cell| format!("<td>{}</td>", escape(cell)))
        .collect::<String>();
    format!("<tr>{cells}</tr>")
}

/// A `<tbody>` holding one row per record.
#[must_use]
pub fn compose_body<'a, I>(records: I) -> String
where
    I: IntoIterator<Item = &'a BookRecord>,
{
    let rows = records.into_iter().map(compose_row).collect::<String>();
    format!("<tbody>{rows}</tbody>")
}
