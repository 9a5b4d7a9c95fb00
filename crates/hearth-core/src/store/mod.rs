//! The operational store: every boundary operation of the chore tracker.
//!
//! [`Store`] owns the SQLite connection. Multi-step mutations (cascading
//! deletes, ledger upsert + summary recompute) run inside a single
//! `BEGIN IMMEDIATE` transaction, so a storage failure aborts atomically and
//! readers never observe partial cascade state.

mod calendar;
mod ledger;
mod people;
mod snapshot;
mod tasks;

pub use calendar::GRID_DAYS;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::path::Path;

use crate::db;
use crate::error::StoreError;

/// Handle over the hearth database.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (or create) the store at `path`, migrating to the latest schema.
    ///
    /// # Errors
    ///
    /// Returns an error if opening or migrating the database fails.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = db::open_store(path).context("open hearth store")?;
        Ok(Self { conn })
    }

    /// Open an in-memory store. Used by tests and the doctor probe.
    ///
    /// # Errors
    ///
    /// Returns an error if migrating the database fails.
    pub fn open_in_memory() -> Result<Self> {
        let conn = db::open_in_memory().context("open in-memory hearth store")?;
        Ok(Self { conn })
    }

    /// Shared access to the underlying connection for read-side helpers.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// The current calendar day. Day boundaries are local calendar days,
    /// not timezone-aware per user.
    #[must_use]
    pub fn today() -> NaiveDate {
        chrono::Local::now().date_naive()
    }

    pub(crate) fn immediate_tx(&mut self) -> Result<Transaction<'_>, StoreError> {
        Ok(self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?)
    }
}
