//! hearth-core library.
//!
//! The completion ledger (`task_completions`) is the source of truth; the
//! `day_summaries` table is a materialized rollup derived from it and can be
//! rebuilt per day at any time.

pub mod config;
pub mod db;
pub mod error;
pub mod lock;
pub mod model;
pub mod store;

/// # Conventions
///
/// - **Errors**: operational APIs return [`error::StoreError`]; internal
///   plumbing uses `anyhow::Result` with context.
/// - **Logging**: use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`).
pub use store::Store;
