//! Command-line options and the resolved runtime configuration. The table name
//! and validation mode live here and are handed to the components that need
//! them instead of being process-wide constants.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{ArgAction, Parser};

use crate::codec::CodecOptions;
use crate::db::default_db_path;
use crate::error::LibraryError;
use crate::query::{TableName, DEFAULT_TABLE};
use crate::table::TitleOverflow;

#[derive(Debug, Parser)]
#[command(name = "library-manager")]
#[command(about = "Maintain a catalog of library books", long_about = None)]
pub struct Cli {
    /// SQLite database file (defaults to ~/.library-manager/books.sqlite)
    #[arg(short, long)]
    pub database: Option<PathBuf>,

    /// Name of the book table
    #[arg(short, long, default_value = DEFAULT_TABLE)]
    pub table: String,

    /// Enforce the title/author/genre length caps and the yyyy year check
    #[arg(long)]
    pub strict: bool,

    /// Wrap long titles across as many continuation rows as needed
    #[arg(long)]
    pub wrap_titles: bool,

    /// Import a file of entries before showing the menu
    #[arg(long, value_name = "FILE")]
    pub import: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Everything the session needs, resolved from [`Cli`].
#[derive(Debug, Clone)]
pub struct Config {
    /// Explicit database file; `None` means the default under the home directory.
    pub database: Option<PathBuf>,
    pub table: TableName,
    pub codec: CodecOptions,
    pub overflow: TitleOverflow,
    pub import: Option<PathBuf>,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        Ok(Self {
            database: cli.database,
            table: TableName::new(cli.table)?,
            codec: if cli.strict {
                CodecOptions::STRICT
            } else {
                CodecOptions::LENIENT
            },
            overflow: if cli.wrap_titles {
                TitleOverflow::Wrap
            } else {
                TitleOverflow::Single
            },
            import: cli.import,
        })
    }

    /// Database file to open. Failing to find a home directory for the default
    /// location is a connection failure like any other.
    pub fn database_path(&self) -> Result<PathBuf, LibraryError> {
        resolve_database(self.database.as_deref(), default_db_path())
    }
}

fn resolve_database(
    explicit: Option<&Path>,
    home_default: Option<PathBuf>,
) -> Result<PathBuf, LibraryError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    home_default.ok_or_else(|| LibraryError::Connection {
        path: PathBuf::from("~/.library-manager/books.sqlite"),
        source: Box::new(io::Error::new(
            io::ErrorKind::NotFound,
            "could not locate home directory",
        )),
    })
}

/// Log filter implied by the number of `-v` flags.
pub fn log_level(verbose: u8) -> log::LevelFilter {
    match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_lenient_and_single_row() {
        let cli = Cli::try_parse_from(["library-manager", "--database", "books.sqlite"]).unwrap();
        let config = Config::from_cli(cli).unwrap();
        assert_eq!(config.database_path().unwrap(), PathBuf::from("books.sqlite"));
        assert_eq!(config.table.as_str(), "bookEntries");
        assert_eq!(config.codec, CodecOptions::LENIENT);
        assert_eq!(config.codec, CodecOptions::default());
        assert_eq!(config.overflow, TitleOverflow::Single);
        assert!(config.import.is_none());
    }

    #[test]
    fn flags_switch_modes() {
        let cli = Cli::try_parse_from([
            "library-manager",
            "-d",
            "x.sqlite",
            "--table",
            "archive",
            "--strict",
            "--wrap-titles",
            "-vv",
        ])
        .unwrap();
        assert_eq!(log_level(cli.verbose), log::LevelFilter::Debug);
        let config = Config::from_cli(cli).unwrap();
        assert_eq!(config.table.as_str(), "archive");
        assert_eq!(config.codec, CodecOptions::STRICT);
        assert_eq!(config.overflow, TitleOverflow::Wrap);
    }

    #[test]
    fn bad_table_name_is_rejected() {
        let cli =
            Cli::try_parse_from(["library-manager", "-d", "x.sqlite", "-t", "no good"]).unwrap();
        assert!(Config::from_cli(cli).is_err());
    }

    #[test]
    fn missing_home_directory_is_a_connection_error() {
        let err = resolve_database(None, None).unwrap_err();
        assert!(matches!(err, LibraryError::Connection { .. }));

        let explicit = resolve_database(Some(Path::new("x.sqlite")), None).unwrap();
        assert_eq!(explicit, PathBuf::from("x.sqlite"));
    }
}
