//! Binary entry point: resolve options, open the catalog database, and hand
//! control to the menu loop until the user quits.
use std::io::{self, IsTerminal};

use clap::Parser;
use library_manager::config::log_level;
use library_manager::{App, BookStore, Cli, Config};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(log_level(cli.verbose))
        .parse_default_env()
        .init();

    let config = Config::from_cli(cli)?;

    let opened = config
        .database_path()
        .and_then(|path| BookStore::open(&path, config.table.clone()));
    let store = match opened {
        Ok(store) => store,
        Err(err) => {
            log::error!("{err:?}");
            println!("Connection could not be established. Goodbye.");
            return Ok(());
        }
    };
    println!("Connection established successfully.\n");

    let styled = io::stdout().is_terminal();
    let mut app = App::new(
        store,
        config.codec,
        config.overflow,
        io::stdin().lock(),
        io::stdout().lock(),
    )
    .with_styling(styled);

    if let Some(path) = &config.import {
        app.import_file(path)?;
    }
    app.run()
}
