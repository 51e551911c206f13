//! Core library surface for the library book manager.
//!
//! The binary only wires these pieces together: it resolves a [`Config`],
//! opens a [`BookStore`], and runs the menu [`App`]. The codec, query
//! builder, ingestion controller, and table renderer are usable on their own.
pub mod codec;
pub mod config;
pub mod db;
pub mod error;
pub mod ingest;
pub mod models;
pub mod query;
pub mod table;
pub mod ui;

pub use config::{Cli, Config};
pub use db::BookStore;
pub use error::{EntryError, LibraryError, ValidationError};
pub use ingest::{IngestionReport, Ingestor, LineFailure};
pub use models::{BookRecord, SearchField};
pub use table::{render_table, TitleOverflow};
pub use ui::{App, Command};
