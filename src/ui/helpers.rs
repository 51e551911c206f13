use std::error::Error;

use crossterm::style::Stylize;

/// Severity of a console message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MessageKind {
    Info,
    Error,
}

/// Prefix a message by kind, coloring it when the output is a terminal.
pub(crate) fn decorate(text: &str, kind: MessageKind, styled: bool) -> String {
    match (kind, styled) {
        (MessageKind::Info, false) => text.to_string(),
        (MessageKind::Info, true) => text.green().to_string(),
        (MessageKind::Error, false) => format!("ERROR: {text}"),
        (MessageKind::Error, true) => format!("{} {text}", "ERROR:".red().bold()),
    }
}

/// Extract the most relevant error message from a chained error: the last
/// cause, or the error itself when it has none.
pub(crate) fn surface_error(err: &(dyn Error + 'static)) -> String {
    let mut root = err;
    while let Some(source) = root.source() {
        root = source;
    }
    root.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EntryError, LibraryError};

    #[test]
    fn plain_output_is_prefixed_by_kind() {
        assert_eq!(decorate("oops", MessageKind::Error, false), "ERROR: oops");
        assert_eq!(decorate("fine", MessageKind::Info, false), "fine");
    }

    #[test]
    fn surface_error_keeps_only_the_root_cause() {
        let err = LibraryError::FileAccess {
            path: "books.txt".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(surface_error(&err), "not found");
    }

    #[test]
    fn surface_error_does_not_repeat_wrapped_storage_errors() {
        let err = EntryError::Storage(LibraryError::Storage(
            rusqlite::Error::QueryReturnedNoRows,
        ));
        let message = surface_error(&err);
        assert_eq!(message, rusqlite::Error::QueryReturnedNoRows.to_string());
        assert!(!message.contains("database error"));
    }

    #[test]
    fn surface_error_without_source_is_the_error_itself() {
        let err = LibraryError::DuplicateIsbn("9780131101630".into());
        assert_eq!(
            surface_error(&err),
            "a book with ISBN 9780131101630 already exists"
        );
    }
}
