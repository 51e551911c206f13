//! Single-entry and bulk ingestion. A bulk import never stops at a bad line:
//! each line is parsed and inserted on its own, and the failures are collected
//! into an [`IngestionReport`] for the caller to print.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{info, warn};

use crate::codec::{self, CodecOptions};
use crate::db::BookStore;
use crate::error::{EntryError, LibraryError};
use crate::models::BookRecord;

/// One line of a bulk import that could not be added.
#[derive(Debug)]
pub struct LineFailure {
    /// 1-based line number in the source.
    pub line_number: usize,
    pub line: String,
    pub reason: EntryError,
}

/// Result of a bulk import.
#[derive(Debug, Default)]
pub struct IngestionReport {
    /// Non-blank lines that were attempted.
    pub attempted: usize,
    pub added: usize,
    pub failures: Vec<LineFailure>,
    /// Set when the source stopped yielding lines because of a read error.
    /// Lines before the error have already been processed.
    pub interrupted: Option<String>,
}

impl IngestionReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.interrupted.is_none()
    }
}

/// Drives the codec and the store for both ingestion paths.
pub struct Ingestor<'a> {
    store: &'a BookStore,
    options: CodecOptions,
}

impl<'a> Ingestor<'a> {
    pub fn new(store: &'a BookStore, options: CodecOptions) -> Self {
        Self { store, options }
    }

    /// Parse and insert one raw line.
    pub fn add_single(&self, raw: &str) -> Result<BookRecord, EntryError> {
        let book = codec::parse_with(raw, self.options)?;
        self.store.insert(&book)?;
        Ok(book)
    }

    /// Attempt every line, skipping blank ones. Successful inserts are kept no
    /// matter what happens to later lines.
    pub fn add_from_lines<I, S>(&self, lines: I) -> IngestionReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut report = IngestionReport::default();
        for (index, line) in lines.into_iter().enumerate() {
            self.ingest_line(&mut report, index + 1, line.as_ref());
        }
        log_summary(&report);
        report
    }

    /// Import a file with one record per line. Failing to open the file is a
    /// single [`LibraryError::FileAccess`]; a read error part-way through is
    /// recorded on the report.
    pub fn add_from_file(&self, path: &Path) -> Result<IngestionReport, LibraryError> {
        let file = File::open(path).map_err(|source| LibraryError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        info!("importing books from {}", path.display());
        Ok(self.add_from_reader(BufReader::new(file)))
    }

    /// Import every line of `reader`. Bytes that are not valid UTF-8 are
    /// replaced rather than ending the import; only an I/O error stops it.
    pub fn add_from_reader<R: BufRead>(&self, mut reader: R) -> IngestionReport {
        let mut report = IngestionReport::default();
        let mut buf = Vec::new();
        let mut line_number = 0;
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {
                    line_number += 1;
                    let decoded = String::from_utf8_lossy(&buf);
                    if let Cow::Owned(_) = decoded {
                        warn!("line {line_number} is not valid UTF-8, undecodable bytes replaced");
                    }
                    let line = decoded.trim_end_matches(['\n', '\r']);
                    self.ingest_line(&mut report, line_number, line);
                }
                Err(err) => {
                    warn!("read error after line {line_number}: {err}");
                    report.interrupted = Some(err.to_string());
                    break;
                }
            }
        }
        log_summary(&report);
        report
    }

    fn ingest_line(&self, report: &mut IngestionReport, line_number: usize, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        report.attempted += 1;
        match self.add_single(line) {
            Ok(_) => report.added += 1,
            Err(reason) => {
                warn!("line {line_number} rejected: {reason}");
                report.failures.push(LineFailure {
                    line_number,
                    line: line.to_string(),
                    reason,
                });
            }
        }
    }
}

fn log_summary(report: &IngestionReport) {
    info!(
        "import finished: {} attempted, {} added, {} failed",
        report.attempted,
        report.added,
        report.failures.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::query::TableName;
    use std::io::{self, Read as _};

    fn store() -> BookStore {
        BookStore::open_in_memory(TableName::default()).unwrap()
    }

    #[test]
    fn add_single_rejects_malformed_line_without_touching_store() {
        let store = store();
        let ingestor = Ingestor::new(&store, CodecOptions::default());
        let err = ingestor.add_single("onlyTwo/Fields").unwrap_err();
        assert!(matches!(
            err,
            EntryError::Validation(ValidationError::FieldCount { found: 2 })
        ));
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn add_single_reports_duplicates_as_storage_errors() {
        let store = store();
        let ingestor = Ingestor::new(&store, CodecOptions::default());
        let line = "9780131101630/Introduction to Algorithms/Cormen/Computer Science/2009";
        ingestor.add_single(line).unwrap();
        assert!(matches!(
            ingestor.add_single(line),
            Err(EntryError::Storage(LibraryError::DuplicateIsbn(_)))
        ));
    }

    #[test]
    fn blank_lines_are_skipped_and_numbering_is_preserved() {
        let store = store();
        let ingestor = Ingestor::new(&store, CodecOptions::default());
        let report = ingestor.add_from_lines([
            "9780000000001/A/B/C/2001",
            "",
            "   ",
            "bad line",
        ]);
        assert_eq!(report.attempted, 2);
        assert_eq!(report.added, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].line_number, 4);
        assert_eq!(report.failures[0].line, "bad line");
        assert!(!report.is_clean());
    }

    /// Yields `data`, then fails every read.
    struct BrokenAfter {
        data: io::Cursor<Vec<u8>>,
    }

    impl io::Read for BrokenAfter {
        fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
            match self.data.read(out)? {
                0 => Err(io::Error::new(io::ErrorKind::Other, "device went away")),
                n => Ok(n),
            }
        }
    }

    #[test]
    fn undecodable_line_does_not_end_the_import() {
        let store = store();
        let ingestor = Ingestor::new(&store, CodecOptions::default());
        let input: &[u8] = b"9780000000001/A/B/C/2001\n9780000000002/Caf\xe9/B/C/2002\n9780000000003/Z/B/C/2003\n";

        let report = ingestor.add_from_reader(input);

        assert_eq!(report.attempted, 3);
        assert_eq!(report.added, 3);
        assert!(report.is_clean());
        assert_eq!(
            store.find_by_isbn("9780000000002").unwrap().unwrap().title,
            "Caf\u{fffd}"
        );
        assert!(store.find_by_isbn("9780000000003").unwrap().is_some());
    }

    #[test]
    fn read_error_keeps_earlier_rows_and_is_recorded() {
        let store = store();
        let ingestor = Ingestor::new(&store, CodecOptions::default());
        let reader = io::BufReader::new(BrokenAfter {
            data: io::Cursor::new(
                b"9780000000001/A/B/C/2001\r\nbad line\n9780000000002/B/B/C/2002\n".to_vec(),
            ),
        });

        let report = ingestor.add_from_reader(reader);

        assert_eq!(report.attempted, 3);
        assert_eq!(report.added, 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].line_number, 2);
        assert_eq!(report.interrupted.as_deref(), Some("device went away"));
        assert_eq!(store.count().unwrap(), 2);
    }
}
