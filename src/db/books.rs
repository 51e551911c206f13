use std::path::Path;

use log::debug;
use rusqlite::{params_from_iter, Connection, ErrorCode, OptionalExtension, Row};

use super::connection::open_connection;
use crate::error::{LibraryError, Result};
use crate::models::{BookRecord, SearchField};
use crate::query::{BoundQuery, QueryBuilder, TableName};

/// The book table behind one SQLite connection. Every statement goes through
/// [`QueryBuilder`] so values are always bound, never spliced into SQL.
pub struct BookStore {
    conn: Connection,
    queries: QueryBuilder,
}

impl BookStore {
    /// Open the database file and make sure the book table exists.
    pub fn open(path: &Path, table: TableName) -> Result<Self> {
        let conn = open_connection(path)?;
        Self::with_connection(conn, table)
    }

    /// Fresh in-memory database with the table created. Used by tests.
    pub fn open_in_memory(table: TableName) -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|err| LibraryError::Connection {
            path: ":memory:".into(),
            source: Box::new(err),
        })?;
        Self::with_connection(conn, table)
    }

    /// Wrap an already-open connection and create the table if it is missing.
    pub fn with_connection(conn: Connection, table: TableName) -> Result<Self> {
        let queries = QueryBuilder::new(table);
        conn.execute(&queries.create_table(), [])?;
        debug!("book table {} ready", queries.table());
        Ok(Self { conn, queries })
    }

    pub fn table(&self) -> &TableName {
        self.queries.table()
    }

    /// Insert one record. A primary-key clash is reported as
    /// [`LibraryError::DuplicateIsbn`] rather than a bare SQLite error.
    pub fn insert(&self, book: &BookRecord) -> Result<()> {
        self.execute(&self.queries.insert(book))
            .map_err(|err| map_unique_constraint(err, &book.isbn))?;
        debug!("inserted {}", book.isbn);
        Ok(())
    }

    /// Every book, ordered by ISBN.
    pub fn fetch_all(&self) -> Result<Vec<BookRecord>> {
        self.query_books(&self.queries.select_all())
    }

    pub fn find_by_isbn(&self, isbn: &str) -> Result<Option<BookRecord>> {
        let query = self.queries.find_by_isbn(isbn);
        let book = self
            .conn
            .query_row(&query.sql, params_from_iter(query.params.iter()), book_from_row)
            .optional()?;
        Ok(book)
    }

    /// Books whose `field` contains `needle`. Case sensitivity follows
    /// SQLite's `LIKE`, which folds ASCII letters only.
    pub fn search(&self, field: SearchField, needle: &str) -> Result<Vec<BookRecord>> {
        self.query_books(&self.queries.search(field, needle))
    }

    /// Delete by ISBN and return how many rows went away. Zero is not an error.
    pub fn delete_by_isbn(&self, isbn: &str) -> Result<usize> {
        let deleted = self.execute(&self.queries.delete_by_isbn(isbn))?;
        debug!("delete {isbn}: {deleted} row(s)");
        Ok(deleted)
    }

    pub fn count(&self) -> Result<usize> {
        let query = self.queries.count();
        let count: i64 = self
            .conn
            .query_row(&query.sql, params_from_iter(query.params.iter()), |row| {
                row.get(0)
            })?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    fn execute(&self, query: &BoundQuery) -> rusqlite::Result<usize> {
        self.conn
            .execute(&query.sql, params_from_iter(query.params.iter()))
    }

    fn query_books(&self, query: &BoundQuery) -> Result<Vec<BookRecord>> {
        let mut stmt = self.conn.prepare(&query.sql)?;
        let books = stmt
            .query_map(params_from_iter(query.params.iter()), book_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(books)
    }
}

fn book_from_row(row: &Row<'_>) -> rusqlite::Result<BookRecord> {
    Ok(BookRecord {
        isbn: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        genre: row.get(3)?,
        year: row.get(4)?,
    })
}

/// The only constraint on the table is the ISBN primary key, so any
/// constraint violation on insert means the book is already there.
fn map_unique_constraint(err: rusqlite::Error, isbn: &str) -> LibraryError {
    if matches!(
        err.sqlite_error_code(),
        Some(ErrorCode::ConstraintViolation)
    ) {
        LibraryError::DuplicateIsbn(isbn.to_string())
    } else {
        err.into()
    }
}
