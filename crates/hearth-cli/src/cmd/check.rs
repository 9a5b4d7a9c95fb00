//! `hearth check` — record a completion and show the refreshed snapshot.

use chrono::NaiveDate;
use clap::Args;
use hearth_core::Store;
use hearth_core::model::TaskKind;

use super::{Ctx, parse_day, parse_kind};
use crate::output::render;

use super::person::write_snapshot;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Person id.
    pub person_id: i64,

    /// Task id.
    pub task_id: i64,

    /// Which id space the task lives in.
    #[arg(short, long, default_value = "global", value_parser = parse_kind)]
    pub kind: TaskKind,

    /// Mark the task as not completed instead.
    #[arg(long)]
    pub undo: bool,

    /// Record against a specific day instead of today.
    #[arg(long, value_parser = parse_day)]
    pub day: Option<NaiveDate>,
}

pub fn run(args: &CheckArgs, ctx: &Ctx) -> anyhow::Result<()> {
    let _lock = ctx.write_lock()?;
    let mut store = ctx.open_store()?;

    let day = args.day.unwrap_or_else(Store::today);
    store.set_completion_on(args.person_id, args.task_id, args.kind, !args.undo, day)?;

    // The caller sees the state their toggle produced, like the snapshot
    // refresh the web flow performed after each completion.
    let snapshot = store.person_snapshot_on(args.person_id, day)?;
    if ctx.quiet {
        return Ok(());
    }
    render(ctx.output, &snapshot, |snapshot, w| {
        write_snapshot(snapshot, w)
    })
}
