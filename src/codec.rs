//! Parsing and validation of the slash-delimited record format
//! `ISBN/Title/Author/Genre/Year`. Everything here is pure so it can be tested
//! without a database.

use crate::error::ValidationError;
use crate::models::{BookRecord, AUTHOR_MAX, GENRE_MAX, ISBN_LEN, TITLE_MAX};

/// Separator between fields of a record line.
pub const FIELD_SEPARATOR: char = '/';

/// How strictly the non-key fields are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecOptions {
    /// Apply the title/author/genre caps and require a four digit year.
    pub enforce_limits: bool,
}

impl CodecOptions {
    pub const STRICT: CodecOptions = CodecOptions {
        enforce_limits: true,
    };
    pub const LENIENT: CodecOptions = CodecOptions {
        enforce_limits: false,
    };
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self::LENIENT
    }
}

/// Parse one record line with the default (lenient) rules: only the field
/// count, the ISBN, and a numeric year are checked.
pub fn parse(raw: &str) -> Result<BookRecord, ValidationError> {
    parse_with(raw, CodecOptions::default())
}

/// Parse one record line.
///
/// The line is trimmed, split on `/`, and trailing empty fields are dropped
/// before counting, so `a/b/c/d/` counts as four fields. The ISBN is always
/// checked. With `enforce_limits` the remaining fields are held to the caps
/// described in the format help; without it only the year has to be an
/// integer because the column is numeric.
pub fn parse_with(raw: &str, options: CodecOptions) -> Result<BookRecord, ValidationError> {
    let mut fields: Vec<&str> = raw.trim().split(FIELD_SEPARATOR).collect();
    while fields.last().is_some_and(|field| field.is_empty()) {
        fields.pop();
    }

    let &[isbn, title, author, genre, year] = fields.as_slice() else {
        return Err(ValidationError::FieldCount {
            found: fields.len(),
        });
    };

    let isbn = validate_isbn(isbn)?;

    let year = if options.enforce_limits {
        check_length("title", title, TITLE_MAX)?;
        check_length("author", author, AUTHOR_MAX)?;
        check_length("genre", genre, GENRE_MAX)?;
        parse_strict_year(year)?
    } else {
        year.parse::<i32>()
            .map_err(|_| ValidationError::YearFormat {
                year: year.to_string(),
            })?
    };

    Ok(BookRecord {
        isbn: isbn.to_string(),
        title: title.to_string(),
        author: author.to_string(),
        genre: genre.to_string(),
        year,
    })
}

/// Check the ISBN rule on its own: exactly 13 characters, all decimal digits.
pub fn validate_isbn(isbn: &str) -> Result<&str, ValidationError> {
    if isbn.len() == ISBN_LEN && is_all_digits(isbn) {
        Ok(isbn)
    } else {
        Err(ValidationError::IsbnFormat {
            isbn: isbn.to_string(),
        })
    }
}

/// True iff `s` is non-empty and made only of `0`-`9`.
pub fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn check_length(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len > max {
        Err(ValidationError::FieldTooLong { field, len, max })
    } else {
        Ok(())
    }
}

fn parse_strict_year(year: &str) -> Result<i32, ValidationError> {
    if year.len() == 4 && is_all_digits(year) {
        if let Ok(value) = year.parse() {
            return Ok(value);
        }
    }
    Err(ValidationError::YearFormat {
        year: year.to_string(),
    })
}
