//! `hearth rebuild-day` — self-healing recompute of one day's summary.

use chrono::NaiveDate;
use clap::Args;
use hearth_core::Store;

use super::{Ctx, parse_day};
use crate::output::{pretty_kv, render};

#[derive(Args, Debug)]
pub struct RebuildDayArgs {
    /// Person id.
    pub person_id: i64,

    /// Day to recompute (defaults to today).
    #[arg(long, value_parser = parse_day)]
    pub day: Option<NaiveDate>,
}

pub fn run(args: &RebuildDayArgs, ctx: &Ctx) -> anyhow::Result<()> {
    let _lock = ctx.write_lock()?;
    let mut store = ctx.open_store()?;

    let day = args.day.unwrap_or_else(Store::today);
    let summary = store.rebuild_day(args.person_id, day)?;

    if ctx.quiet {
        return Ok(());
    }
    render(ctx.output, &summary, |summary, w| {
        pretty_kv(w, "day", summary.day.to_string())?;
        pretty_kv(
            w,
            "completed",
            format!("{}/{}", summary.completed_tasks, summary.total_tasks),
        )?;
        pretty_kv(w, "level 2", if summary.is_level2 { "yes" } else { "no" })
    })
}
