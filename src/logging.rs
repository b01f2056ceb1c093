use anyhow::{Context, Result};
use env_logger::{Env, Target};
use std::fs::OpenOptions;
use std::path::Path;

pub(crate) const LOG_ENV: &str = "SPENDTUI_LOG";

/// Send log records to `spendtui.log` in `data_dir`; the terminal belongs to the UI.
pub(crate) fn init(data_dir: &Path) -> Result<()> {
    let path = data_dir.join("spendtui.log");
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    env_logger::Builder::from_env(Env::default().filter_or(LOG_ENV, "info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .context("Logger already initialized")?;
    Ok(())
}
