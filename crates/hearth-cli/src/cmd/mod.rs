//! Command handlers. One module per subcommand; shared context here.

pub mod calendar;
pub mod check;
pub mod completions;
pub mod doctor;
pub mod init;
pub mod person;
pub mod rebuild;
pub mod task;

use anyhow::{Context as _, Result};
use chrono::NaiveDate;
use hearth_core::Store;
use hearth_core::config;
use hearth_core::lock::{StoreReadLock, StoreWriteLock};
use hearth_core::model::TaskKind;
use std::path::PathBuf;
use std::time::Duration;

use crate::output::OutputMode;

/// How long a command waits for another `hearth` process to release the store.
pub const LOCK_TIMEOUT: Duration = Duration::from_secs(5);

/// Per-invocation context shared by every command handler.
pub struct Ctx {
    pub db_path: PathBuf,
    pub output: OutputMode,
    pub quiet: bool,
}

impl Ctx {
    /// Open the store at the resolved path.
    pub fn open_store(&self) -> Result<Store> {
        Store::open(&self.db_path)
            .with_context(|| format!("open store at {}", self.db_path.display()))
    }

    /// Exclusive advisory lock held for the duration of a mutating command.
    pub fn write_lock(&self) -> Result<StoreWriteLock> {
        Ok(StoreWriteLock::acquire(
            &config::lock_path_for(&self.db_path),
            LOCK_TIMEOUT,
        )?)
    }

    /// Shared advisory lock held for the duration of a reading command.
    pub fn read_lock(&self) -> Result<StoreReadLock> {
        Ok(StoreReadLock::acquire(
            &config::lock_path_for(&self.db_path),
            LOCK_TIMEOUT,
        )?)
    }
}

/// Clap value parser for `YYYY-MM-DD` days.
pub fn parse_day(raw: &str) -> Result<NaiveDate, String> {
    raw.parse::<NaiveDate>()
        .map_err(|error| format!("invalid day '{raw}': {error} (expected YYYY-MM-DD)"))
}

/// Clap value parser for task kinds.
pub fn parse_kind(raw: &str) -> Result<TaskKind, String> {
    raw.parse::<TaskKind>().map_err(|error| error.to_string())
}
