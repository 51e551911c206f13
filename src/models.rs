//! Domain model that mirrors the book table. `BookRecord` stays a plain data
//! holder so the codec, the store, and the table renderer can all pass it
//! around without caring where it came from.

use std::fmt;

/// Column widths and caps shared by the codec and the table renderer.
pub const ISBN_LEN: usize = 13;
/// Longest title accepted in strict mode.
pub const TITLE_MAX: usize = 100;
/// Longest author name accepted in strict mode.
pub const AUTHOR_MAX: usize = 50;
/// Longest genre accepted in strict mode.
pub const GENRE_MAX: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
/// One book in the catalog. Records are built from a single input line or a
/// single database row and are never edited afterwards.
pub struct BookRecord {
    /// Thirteen decimal digits, no hyphens. Primary key of the table.
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub genre: String,
    /// Publication year.
    pub year: i32,
}

impl BookRecord {
    /// Render the record back into the `ISBN/Title/Author/Genre/Year` line
    /// format accepted by the codec.
    pub fn to_line(&self) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            self.isbn, self.title, self.author, self.genre, self.year
        )
    }
}

impl fmt::Display for BookRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.title, self.author, self.isbn)
    }
}

/// Columns a user may filter the catalog on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Title,
    Author,
    Genre,
}

impl SearchField {
    /// Map the sub-menu answer (`1`, `2`, `3`) to a field.
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(SearchField::Title),
            "2" => Some(SearchField::Author),
            "3" => Some(SearchField::Genre),
            _ => None,
        }
    }

    /// Column name in the book table.
    pub fn column(self) -> &'static str {
        match self {
            SearchField::Title => "title",
            SearchField::Author => "author",
            SearchField::Genre => "genre",
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}
