mod aggregate;
mod config;
mod logging;
mod models;
mod run;
mod storage;
mod store;
mod ui;

use anyhow::Result;
use clap::Parser;

use crate::config::Cli;
use crate::storage::TransactionStorage;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let data_dir = cli.resolve_data_dir()?;
    logging::init(&data_dir)?;
    log::info!("Starting SpendTUI {}", env!("CARGO_PKG_VERSION"));

    let mut storage = TransactionStorage::new(storage::open_backend(cli.backend, &data_dir)?);

    match cli.command {
        Some(command) => run::as_cli(command, &mut storage),
        None => run::as_tui(&mut storage),
    }
}
