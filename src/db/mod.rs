//! Persistence module split across logical submodules.

mod books;
mod connection;

pub use books::BookStore;
pub use connection::{default_db_path, open_connection};
