//! `hearth init` — create the database and bring it to the latest schema.

use clap::Args;
use hearth_core::db::migrations;
use serde::Serialize;

use super::Ctx;
use crate::output::{pretty_kv, render};

#[derive(Args, Debug)]
pub struct InitArgs {}

#[derive(Serialize)]
struct InitReport {
    db_path: String,
    schema_version: u32,
}

pub fn run(_args: &InitArgs, ctx: &Ctx) -> anyhow::Result<()> {
    let _lock = ctx.write_lock()?;
    let store = ctx.open_store()?;
    let schema_version = migrations::current_schema_version(store.connection())?;

    let report = InitReport {
        db_path: ctx.db_path.display().to_string(),
        schema_version,
    };

    if ctx.quiet {
        return Ok(());
    }
    render(ctx.output, &report, |report, w| {
        pretty_kv(w, "database", &report.db_path)?;
        pretty_kv(w, "schema", report.schema_version.to_string())
    })
}
