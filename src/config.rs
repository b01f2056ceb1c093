use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::storage::Backend;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Directory holding the transaction store and log file
    #[arg(long, env = "SPENDTUI_DATA_DIR", global = true)]
    pub(crate) data_dir: Option<PathBuf>,

    /// Where the transaction list is kept
    #[arg(long, env = "SPENDTUI_BACKEND", value_enum, default_value_t = Backend::Sqlite, global = true)]
    pub(crate) backend: Backend,

    #[command(subcommand)]
    pub(crate) command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    /// Record a transaction
    Add {
        /// Amount, e.g. 12.50
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Category label (kept exactly as typed)
        category: String,
        /// Month as YYYY-MM (default: current month)
        #[arg(long, short)]
        month: Option<String>,
    },
    /// Print the total and per-category sums for a month
    Summary {
        /// Month as YYYY-MM (default: all months)
        month: Option<String>,
    },
    /// List transactions for a month in insertion order
    List {
        /// Month as YYYY-MM (default: all months)
        month: Option<String>,
    },
    /// List the months that have transactions
    Months,
}

impl Cli {
    /// The configured data directory, or the platform default. Created if missing.
    pub(crate) fn resolve_data_dir(&self) -> Result<PathBuf> {
        let dir = match &self.data_dir {
            Some(dir) => dir.clone(),
            None => directories::ProjectDirs::from("com", "spendtui", "SpendTUI")
                .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?
                .data_dir()
                .to_path_buf(),
        };
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;
        Ok(dir)
    }
}
