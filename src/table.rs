//! Fixed-width text table for listing books.
//!
//! ```text
//! -----------------------------------------------------------------------...
//! |ISBN         |Title                       ...|Author    ...|Genre          |Year|
//! -----------------------------------------------------------------------...
//! |9780131101630|Introduction to Algorithms  ...|Cormen    ...|Textbook       |2009|
//! -----------------------------------------------------------------------...
//! ```
//!
//! Titles wider than the title column spill onto continuation rows that leave
//! the other columns blank. Every row, continuation rows included, is closed
//! by its own border line.

use std::fmt::Write as _;

use crate::models::BookRecord;

/// Width of the border lines.
pub const TABLE_WIDTH: usize = 137;
const ISBN_WIDTH: usize = 13;
const TITLE_WIDTH: usize = 50;
const AUTHOR_WIDTH: usize = 50;
const GENRE_WIDTH: usize = 15;
/// Blank stand-in for the year column on continuation rows.
const BLANK_YEAR: &str = "    ";

/// What to do with the part of a title that does not fit the title column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TitleOverflow {
    /// One continuation row holding the whole remainder, even if the remainder
    /// is itself wider than the column.
    #[default]
    Single,
    /// As many continuation rows as needed, each at most one column wide.
    Wrap,
}

/// Render the header followed by one block of rows per record.
pub fn render_table(records: &[BookRecord], overflow: TitleOverflow) -> String {
    let mut out = render_header();
    for record in records {
        out.push_str(&render_row(record, overflow));
    }
    out
}

/// Border, column names, border.
pub fn render_header() -> String {
    let mut out = border_line();
    let _ = writeln!(
        out,
        "|{:<ISBN_WIDTH$}|{:<TITLE_WIDTH$}|{:<AUTHOR_WIDTH$}|{:<GENRE_WIDTH$}|Year|",
        "ISBN", "Title", "Author", "Genre"
    );
    out.push_str(&border_line());
    out
}

/// The primary row for `record`, any continuation rows, each followed by a
/// border line.
pub fn render_row(record: &BookRecord, overflow: TitleOverflow) -> String {
    let (head, rest) = split_at_char(&record.title, TITLE_WIDTH);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "|{}|{:<TITLE_WIDTH$}|{:<AUTHOR_WIDTH$}|{:<GENRE_WIDTH$}|{}|",
        record.isbn, head, record.author, record.genre, record.year
    );
    out.push_str(&border_line());

    for piece in continuation_pieces(rest, overflow) {
        let _ = writeln!(
            out,
            "|{:<ISBN_WIDTH$}|{:<TITLE_WIDTH$}|{:<AUTHOR_WIDTH$}|{:<GENRE_WIDTH$}|{BLANK_YEAR}|",
            "", piece, "", ""
        );
        out.push_str(&border_line());
    }
    out
}

fn border_line() -> String {
    let mut line = "-".repeat(TABLE_WIDTH);
    line.push('\n');
    line
}

fn continuation_pieces(rest: &str, overflow: TitleOverflow) -> Vec<&str> {
    if rest.is_empty() {
        return Vec::new();
    }
    match overflow {
        TitleOverflow::Single => vec![rest],
        TitleOverflow::Wrap => {
            let mut pieces = Vec::new();
            let mut remaining = rest;
            while !remaining.is_empty() {
                let (piece, tail) = split_at_char(remaining, TITLE_WIDTH);
                pieces.push(piece);
                remaining = tail;
            }
            pieces
        }
    }
}

/// Split after the first `n` characters (not bytes).
fn split_at_char(s: &str, n: usize) -> (&str, &str) {
    match s.char_indices().nth(n) {
        Some((idx, _)) => s.split_at(idx),
        None => (s, ""),
    }
}
