//! CSV encoding for book collections
//!
//! Comma-separated, double-quote escaped, one record per CRLF-terminated row.

use crate::models::BookView;

/// Column header, in output order
pub const HEADER: [&str; 5] = ["id", "title", "subtitle", "author", "list"];

/// Encode `books` as CSV with a header row
pub fn encode_books<'a, I>(books: I) -> String
where
    I: IntoIterator<Item = &'a BookView>,
{
    let mut out = String::new();
    write_row(&mut out, HEADER);
    for book in books {
        let id = book.id.to_string();
        write_row(
            &mut out,
            [
                id.as_str(),
                book.title.as_str(),
                book.subtitle.as_deref().unwrap_or(""),
                book.author.as_deref().unwrap_or(""),
                book.list.as_str(),
            ],
        );
    }
    out
}

fn write_row<'a>(out: &mut String, fields: impl IntoIterator<Item = &'a str>) {
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_field(out, field);
    }
    out.push_str("\r\n");
}

fn write_field(out: &mut String, value: &str) {
    if !value.contains([',', '"', '\r', '\n']) {
        out.push_str(value);
        return;
    }
    out.push('"');
    out.push_str(&value.replace('"', "\"\""));
    out.push('"');
}
