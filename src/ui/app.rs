use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use log::{error, info};

use super::helpers::{decorate, surface_error, MessageKind};
use super::menu::{format_help, Command, GREETING};
use crate::codec::{self, CodecOptions};
use crate::db::BookStore;
use crate::error::LibraryError;
use crate::ingest::{IngestionReport, Ingestor};
use crate::models::SearchField;
use crate::table::{render_header, render_row, render_table, TitleOverflow};

/// The interactive menu session. Input and output are generic so the whole
/// loop can be driven from a script in tests.
pub struct App<R, W> {
    store: BookStore,
    codec: CodecOptions,
    overflow: TitleOverflow,
    input: R,
    output: W,
    styled: bool,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn new(
        store: BookStore,
        codec: CodecOptions,
        overflow: TitleOverflow,
        input: R,
        output: W,
    ) -> Self {
        Self {
            store,
            codec,
            overflow,
            input,
            output,
            styled: false,
        }
    }

    /// Color `ERROR:` prefixes and confirmations. Only worth enabling when the
    /// output is a terminal.
    pub fn with_styling(mut self, styled: bool) -> Self {
        self.styled = styled;
        self
    }

    pub fn store(&self) -> &BookStore {
        &self.store
    }

    /// Hand back the output sink, mostly so tests can inspect what was printed.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Greet the user and loop over the menu until they quit or input ends.
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "{GREETING}").context("failed to write greeting")?;
        loop {
            let command = self.read_command()?;
            if command == Command::Quit {
                break;
            }
            self.dispatch(command)?;
            writeln!(self.output)?;
        }
        self.output.flush().context("failed to flush output")?;
        Ok(())
    }

    /// Run a single menu command. `Quit` is a no-op here; [`App::run`] decides
    /// when to stop.
    pub fn dispatch(&mut self, command: Command) -> Result<()> {
        info!("menu command: {command:?}");
        match command {
            Command::Quit => Ok(()),
            Command::ShowFormat => {
                writeln!(self.output, "{}", format_help())?;
                Ok(())
            }
            Command::AddEntry => self.add_entry(),
            Command::AddFromFile => self.add_from_file(),
            Command::ListAll => self.list_all(),
            Command::CheckEntry => self.check_entry(),
            Command::DeleteEntry => self.delete_entry(),
            Command::ListSubset => self.list_subset(),
        }
    }

    /// Bulk-import `path` outside of the menu, printing the same report as
    /// the menu command does.
    pub fn import_file(&mut self, path: &Path) -> Result<()> {
        let ingestor = Ingestor::new(&self.store, self.codec);
        match ingestor.add_from_file(path) {
            Ok(report) => self.print_report(&report),
            Err(err @ LibraryError::FileAccess { .. }) => {
                error!("{}", surface_error(&err));
                self.print_error(&format!("File {} cannot be found.", path.display()))
            }
            Err(err) => self.print_error(&surface_error(&err)),
        }
    }

    fn read_command(&mut self) -> Result<Command> {
        writeln!(
            self.output,
            "Now what would you like to do? (Enter the number of your choice)."
        )?;
        for command in Command::ALL {
            writeln!(self.output, "{}: {}", command.number(), command.label())?;
        }
        loop {
            let Some(choice) = self.prompt("Choice: ")? else {
                writeln!(self.output)?;
                return Ok(Command::Quit);
            };
            if let Some(command) = Command::from_choice(&choice) {
                writeln!(self.output)?;
                return Ok(command);
            }
            self.print_error(
                "choice must be a single digit number that corresponds to an option",
            )?;
        }
    }

    fn add_entry(&mut self) -> Result<()> {
        writeln!(
            self.output,
            "Enter the information for the book according to the formatting guidelines: "
        )?;
        let Some(line) = self.read_line()? else {
            return Ok(());
        };

        let result = Ingestor::new(&self.store, self.codec).add_single(&line);
        match result {
            Ok(book) => {
                info!("added {book}");
                self.print_info("Book added successfully.")
            }
            Err(err) => {
                self.print_error(&format!(
                    "Book {} could not be added ({}),",
                    line.trim(),
                    surface_error(&err)
                ))?;
                writeln!(
                    self.output,
                    "check that you have followed the formatting guidelines."
                )?;
                Ok(())
            }
        }
    }

    fn add_from_file(&mut self) -> Result<()> {
        let Some(name) = self.prompt("Enter the location of the file: ")? else {
            return Ok(());
        };
        self.import_file(Path::new(name.trim()))
    }

    fn print_report(&mut self, report: &IngestionReport) -> Result<()> {
        for failure in &report.failures {
            self.print_error(&format!(
                "could not add book on line {}: {} ({})",
                failure.line_number,
                failure.line,
                surface_error(&failure.reason)
            ))?;
        }
        if let Some(reason) = &report.interrupted {
            self.print_error(&format!("could not read from the file ({reason})."))?;
        }
        if report.is_clean() {
            self.print_info(&format!(
                "All books added successfully ({} added).",
                report.added
            ))
        } else {
            writeln!(
                self.output,
                "{} of {} books added. Any other books were still added successfully.",
                report.added, report.attempted
            )?;
            Ok(())
        }
    }

    fn list_all(&mut self) -> Result<()> {
        match self.store.fetch_all() {
            Ok(books) => {
                write!(self.output, "{}", render_table(&books, self.overflow))?;
                Ok(())
            }
            Err(err) => {
                error!("listing books failed: {}", surface_error(&err));
                self.print_error("could not read from table.")
            }
        }
    }

    fn check_entry(&mut self) -> Result<()> {
        let Some(isbn) = self.prompt("Enter the ISBN of the book to check for: ")? else {
            return Ok(());
        };
        let isbn = isbn.trim();
        if let Err(err) = codec::validate_isbn(isbn) {
            return self.print_error(&err.to_string());
        }

        match self.store.find_by_isbn(isbn) {
            Ok(Some(book)) => {
                write!(
                    self.output,
                    "{}{}",
                    render_header(),
                    render_row(&book, self.overflow)
                )?;
                Ok(())
            }
            Ok(None) => {
                writeln!(self.output, "Book {isbn} is not in the database.")?;
                Ok(())
            }
            Err(err) => {
                error!("lookup of {isbn} failed: {}", surface_error(&err));
                self.print_error(&format!("could not check table for book {isbn}."))
            }
        }
    }

    fn delete_entry(&mut self) -> Result<()> {
        let Some(isbn) =
            self.prompt("Enter an ISBN number for the book you wish to delete: ")?
        else {
            return Ok(());
        };
        let isbn = isbn.trim();
        if let Err(err) = codec::validate_isbn(isbn) {
            return self.print_error(&err.to_string());
        }

        match self.store.delete_by_isbn(isbn) {
            Ok(0) => {
                writeln!(self.output, "Book {isbn} is not in the database.")?;
                Ok(())
            }
            Ok(_) => self.print_info(&format!("Book {isbn} deleted.")),
            Err(err) => {
                error!("delete of {isbn} failed: {}", surface_error(&err));
                self.print_error("could not delete entry.")
            }
        }
    }

    fn list_subset(&mut self) -> Result<()> {
        writeln!(
            self.output,
            "You can get a subset of all the books from the database with"
        )?;
        writeln!(self.output, "the same title, author, or genre.")?;
        let Some(choice) = self.prompt("Enter 1 for title, 2 for author, 3 for genre: ")? else {
            return Ok(());
        };
        let Some(field) = SearchField::from_choice(&choice) else {
            return self.print_error(&format!("{} is not a valid option.", choice.trim()));
        };

        let question = format!(
            "Now enter the {field} that you want the entries for (you will be given a table \
             containing every entry whose {field} has the answer you enter here): "
        );
        let Some(needle) = self.prompt(&question)? else {
            return Ok(());
        };

        match self.store.search(field, &needle) {
            Ok(books) => {
                write!(self.output, "{}", render_table(&books, self.overflow))?;
                Ok(())
            }
            Err(err) => {
                error!("search on {field} failed: {}", surface_error(&err));
                self.print_error("could not read from table.")
            }
        }
    }

    fn prompt(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush().context("failed to flush prompt")?;
        self.read_line()
    }

    /// Next input line without its line terminator, or `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read from input")?;
        if read == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    fn print_info(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", decorate(text, MessageKind::Info, self.styled))?;
        Ok(())
    }

    fn print_error(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", decorate(text, MessageKind::Error, self.styled))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::TableName;
    use std::io::{self, Cursor, Read as _};

    fn app() -> App<Cursor<Vec<u8>>, Vec<u8>> {
        let store = BookStore::open_in_memory(TableName::default()).unwrap();
        App::new(
            store,
            CodecOptions::default(),
            TitleOverflow::Single,
            Cursor::new(Vec::new()),
            Vec::new(),
        )
    }

    struct BrokenAfter(Cursor<Vec<u8>>);

    impl io::Read for BrokenAfter {
        fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
            match self.0.read(out)? {
                0 => Err(io::Error::new(io::ErrorKind::Other, "device went away")),
                n => Ok(n),
            }
        }
    }

    #[test]
    fn interrupted_import_is_reported_with_partial_counts() {
        let mut app = app();
        let data = b"9780000000001/A/B/C/2001\n9780000000002/B/B/C/2002\n".to_vec();
        let report = Ingestor::new(app.store(), CodecOptions::default())
            .add_from_reader(io::BufReader::new(BrokenAfter(Cursor::new(data))));
        app.print_report(&report).unwrap();

        assert_eq!(app.store().count().unwrap(), 2);
        let output = String::from_utf8(app.into_output()).unwrap();
        assert!(output.contains("ERROR: could not read from the file (device went away)."));
        assert!(output.contains("2 of 2 books added."));
        assert!(!output.contains("All books added successfully"));
    }

    #[test]
    fn clean_import_reports_success() {
        let mut app = app();
        let report = Ingestor::new(app.store(), CodecOptions::default())
            .add_from_lines(["9780131101630/Introduction to Algorithms/Cormen/Computer Science/2009"]);
        app.print_report(&report).unwrap();

        let output = String::from_utf8(app.into_output()).unwrap();
        assert!(output.contains("All books added successfully (1 added)."));
    }
}
