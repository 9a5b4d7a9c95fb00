//! `hearth doctor` — database reachability and store stats.

use clap::Args;
use hearth_core::db::migrations;
use serde::Serialize;

use super::Ctx;
use crate::output::{pretty_kv, render};

#[derive(Args, Debug)]
pub struct DoctorArgs {}

#[derive(Serialize)]
struct DoctorReport {
    db_path: String,
    schema_version: u32,
    people: usize,
    global_tasks: usize,
    ok: bool,
}

pub fn run(_args: &DoctorArgs, ctx: &Ctx) -> anyhow::Result<()> {
    let _lock = ctx.read_lock()?;
    let store = ctx.open_store()?;

    let report = DoctorReport {
        db_path: ctx.db_path.display().to_string(),
        schema_version: migrations::current_schema_version(store.connection())?,
        people: store.people()?.len(),
        global_tasks: store.global_tasks()?.len(),
        ok: true,
    };

    render(ctx.output, &report, |report, w| {
        pretty_kv(w, "database", &report.db_path)?;
        pretty_kv(w, "schema", report.schema_version.to_string())?;
        pretty_kv(w, "people", report.people.to_string())?;
        pretty_kv(w, "chores", report.global_tasks.to_string())?;
        pretty_kv(w, "status", "ok")
    })
}
