//! Error taxonomy shared by the codec, the store, and the ingestion flow.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why a raw `ISBN/Title/Author/Genre/Year` line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("expected 5 fields separated by '/', found {found}")]
    FieldCount { found: usize },

    #[error("'{isbn}' is not a valid ISBN (13 digits, no hyphens)")]
    IsbnFormat { isbn: String },

    #[error("{field} is {len} characters long, the limit is {max}")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("'{year}' is not a valid year (expected yyyy)")]
    YearFormat { year: String },
}

/// Failures coming from the backing store or the filesystem.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("could not open database at {path}")]
    Connection {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("'{0}' is not a valid table name")]
    InvalidTableName(String),

    #[error("a book with ISBN {0} already exists")]
    DuplicateIsbn(String),

    #[error("database error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("file {path} cannot be read")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Outcome of a failed single-entry ingestion.
#[derive(Debug, Error)]
pub enum EntryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] LibraryError),
}

pub type Result<T, E = LibraryError> = std::result::Result<T, E>;
