use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use log::debug;
use rusqlite::Connection;

use crate::error::{LibraryError, Result};

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".library-manager";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "books.sqlite";

/// Open (creating if needed) the SQLite file at `path`. Any failure here is a
/// connection failure: the program cannot do anything useful without it.
pub fn open_connection(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| connection_error(path, err))?;
    }

    debug!("opening database at {}", path.display());
    Connection::open(path).map_err(|err| connection_error(path, err))
}

fn connection_error(
    path: &Path,
    source: impl std::error::Error + Send + Sync + 'static,
) -> LibraryError {
    LibraryError::Connection {
        path: path.to_path_buf(),
        source: Box::new(source),
    }
}

/// Resolve the default database path inside the user's home, if there is one.
pub fn default_db_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}
