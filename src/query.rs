//! Builds the SQL for every catalog operation. User input never becomes part
//! of the statement text: values travel as positional parameters, and the only
//! interpolated piece is the table name, which is validated up front.

use std::fmt;

use rusqlite::types::Value;

use crate::error::LibraryError;
use crate::models::{BookRecord, SearchField};

/// Table used when no name is configured.
pub const DEFAULT_TABLE: &str = "bookEntries";

/// Escape character used in `LIKE` patterns built by [`QueryBuilder::search`].
const LIKE_ESCAPE: char = '\\';

/// A validated SQL identifier naming the book table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableName(String);

impl TableName {
    /// Accept `[A-Za-z_][A-Za-z0-9_]*` only.
    pub fn new(name: impl Into<String>) -> Result<Self, LibraryError> {
        let name = name.into();
        let mut chars = name.chars();
        let valid_start = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        if valid_start && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            Ok(Self(name))
        } else {
            Err(LibraryError::InvalidTableName(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Double-quoted form for embedding in statement text.
    fn quoted(&self) -> String {
        format!("\"{}\"", self.0)
    }
}

impl Default for TableName {
    fn default() -> Self {
        Self(DEFAULT_TABLE.to_string())
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Statement text plus the values bound to `?1`, `?2`, ... in order.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundQuery {
    pub sql: String,
    pub params: Vec<Value>,
}

/// Produces [`BoundQuery`] values against one configured table.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    table: TableName,
}

impl QueryBuilder {
    pub fn new(table: TableName) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &TableName {
        &self.table
    }

    pub fn create_table(&self) -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS {} (
                isbn TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                author TEXT NOT NULL,
                genre TEXT NOT NULL,
                year INTEGER NOT NULL
            )",
            self.table.quoted()
        )
    }

    pub fn insert(&self, book: &BookRecord) -> BoundQuery {
        BoundQuery {
            sql: format!(
                "INSERT INTO {} (isbn, title, author, genre, year) VALUES (?1, ?2, ?3, ?4, ?5)",
                self.table.quoted()
            ),
            params: vec![
                Value::Text(book.isbn.clone()),
                Value::Text(book.title.clone()),
                Value::Text(book.author.clone()),
                Value::Text(book.genre.clone()),
                Value::Integer(i64::from(book.year)),
            ],
        }
    }

    pub fn select_all(&self) -> BoundQuery {
        BoundQuery {
            sql: format!("{} ORDER BY isbn", self.select_columns()),
            params: Vec::new(),
        }
    }

    pub fn find_by_isbn(&self, isbn: &str) -> BoundQuery {
        BoundQuery {
            sql: format!("{} WHERE isbn = ?1", self.select_columns()),
            params: vec![Value::Text(isbn.to_string())],
        }
    }

    /// "`field` contains `needle`". Wildcards inside `needle` match literally.
    pub fn search(&self, field: SearchField, needle: &str) -> BoundQuery {
        BoundQuery {
            sql: format!(
                "{} WHERE {} LIKE ?1 ESCAPE '{LIKE_ESCAPE}' ORDER BY isbn",
                self.select_columns(),
                field.column()
            ),
            params: vec![Value::Text(contains_pattern(needle))],
        }
    }

    pub fn delete_by_isbn(&self, isbn: &str) -> BoundQuery {
        BoundQuery {
            sql: format!("DELETE FROM {} WHERE isbn = ?1", self.table.quoted()),
            params: vec![Value::Text(isbn.to_string())],
        }
    }

    pub fn count(&self) -> BoundQuery {
        BoundQuery {
            sql: format!("SELECT COUNT(*) FROM {}", self.table.quoted()),
            params: Vec::new(),
        }
    }

    fn select_columns(&self) -> String {
        format!(
            "SELECT isbn, title, author, genre, year FROM {}",
            self.table.quoted()
        )
    }
}

/// Wrap `needle` in `%` after escaping the `LIKE` metacharacters it contains.
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_') || c == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
