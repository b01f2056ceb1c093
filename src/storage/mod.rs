mod file;
#[cfg(test)]
mod memory;
mod schema;
mod sqlite;

use anyhow::{Context, Result};
use std::path::Path;

use crate::models::Transaction;

pub(crate) use file::FileStore;
#[cfg(test)]
pub(crate) use memory::MemoryStore;
pub(crate) use sqlite::SqliteStore;

/// Slot key holding the full transaction list.
pub(crate) const TRANSACTIONS_KEY: &str = "transactions";

/// A persistent string slot per key.
pub(crate) trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl KeyValueStore for Box<dyn KeyValueStore> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum Backend {
    /// A row in `spendtui.db`
    Sqlite,
    /// A JSON file per slot
    File,
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite => write!(f, "sqlite"),
            Self::File => write!(f, "file"),
        }
    }
}

/// Open the configured backend rooted at `data_dir`.
pub(crate) fn open_backend(backend: Backend, data_dir: &Path) -> Result<Box<dyn KeyValueStore>> {
    let store: Box<dyn KeyValueStore> = match backend {
        Backend::Sqlite => Box::new(SqliteStore::open(&data_dir.join("spendtui.db"))?),
        Backend::File => Box::new(FileStore::open(data_dir)?),
    };
    log::info!("Opened {backend} storage in {}", data_dir.display());
    Ok(store)
}

/// Reads and writes the whole transaction list as one JSON array.
pub(crate) struct TransactionStorage<K: KeyValueStore = Box<dyn KeyValueStore>> {
    kv: K,
}

impl<K: KeyValueStore> TransactionStorage<K> {
    pub(crate) fn new(kv: K) -> Self {
        Self { kv }
    }

    /// The persisted list. Missing, unreadable, or malformed data all load as
    /// an empty list; the cause is only logged.
    pub(crate) fn load(&self) -> Vec<Transaction> {
        let raw = match self.kv.get(TRANSACTIONS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                log::info!("No saved transactions, starting empty");
                return Vec::new();
            }
            Err(e) => {
                log::warn!("Could not read saved transactions: {e:#}");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Transaction>>(&raw) {
            Ok(txns) => {
                log::info!("Loaded {} transactions", txns.len());
                txns
            }
            Err(e) => {
                log::warn!("Ignoring malformed saved transactions: {e}");
                Vec::new()
            }
        }
    }

    /// Replace the persisted list with `transactions`.
    pub(crate) fn save(&mut self, transactions: &[Transaction]) -> Result<()> {
        let raw = serde_json::to_string(transactions).context("Failed to encode transactions")?;
        self.kv.set(TRANSACTIONS_KEY, &raw)?;
        log::debug!("Saved {} transactions ({} bytes)", transactions.len(), raw.len());
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn kv(&self) -> &K {
        &self.kv
    }
}

#[cfg(test)]
mod tests;
