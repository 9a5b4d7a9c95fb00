//! The calendar materializer: per-day summaries and the 42-cell month grid.
//!
//! The ledger is authoritative; `day_summaries` is a rebuildable cache.
//! [`rebuild_day_in`] is the one write path for the cache — the ledger upsert
//! calls it synchronously, and [`Store::rebuild_day`] exposes it for
//! self-healing. Task deletion takes the incremental path instead
//! ([`retract_completion`]) inside the same transaction that removes the
//! ledger rows.

use chrono::{Datelike, Days, NaiveDate};
use rusqlite::{Connection, params};
use std::collections::HashMap;
use tracing::info;

use super::Store;
use crate::db::query;
use crate::error::StoreError;
use crate::model::{DayCell, DaySummary, PersonMonth};

/// The month grid always spans exactly six full weeks.
pub const GRID_DAYS: u64 = 42;

/// Recount one (person, day) from the ledger and upsert its summary.
pub(crate) fn rebuild_day_in(
    conn: &Connection,
    person_id: i64,
    day: NaiveDate,
) -> rusqlite::Result<DaySummary> {
    let (total_tasks, completed_tasks): (u32, u32) = conn.query_row(
        "SELECT COUNT(*), COALESCE(SUM(completed), 0)
         FROM task_completions WHERE person_id = ?1 AND day = ?2",
        params![person_id, day],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;
    let is_level2 = DaySummary::level2(completed_tasks, total_tasks);

    conn.execute(
        "INSERT INTO day_summaries (person_id, day, completed_tasks, total_tasks, is_level2)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT (person_id, day) DO UPDATE SET
            completed_tasks = excluded.completed_tasks,
            total_tasks = excluded.total_tasks,
            is_level2 = excluded.is_level2",
        params![person_id, day, completed_tasks, total_tasks, is_level2],
    )?;

    Ok(DaySummary {
        person_id,
        day,
        completed_tasks,
        total_tasks,
        is_level2,
    })
}

/// Remove one ledger row's contribution from its day summary: decrement the
/// counts and re-evaluate Level-2. Counts clamp at zero so a missing or stale
/// summary cannot underflow.
pub(crate) fn retract_completion(
    conn: &Connection,
    person_id: i64,
    day: NaiveDate,
    was_completed: bool,
) -> rusqlite::Result<()> {
    conn.execute(
        "UPDATE day_summaries
         SET total_tasks = MAX(total_tasks - 1, 0),
             completed_tasks = MAX(completed_tasks - ?3, 0)
         WHERE person_id = ?1 AND day = ?2",
        params![person_id, day, i64::from(was_completed)],
    )?;
    conn.execute(
        "UPDATE day_summaries
         SET is_level2 = (total_tasks > 0 AND completed_tasks = total_tasks)
         WHERE person_id = ?1 AND day = ?2",
        params![person_id, day],
    )?;
    Ok(())
}

impl Store {
    /// Recompute one (person, day) summary from the ledger. The self-healing
    /// entry point: whatever incremental maintenance left behind, this
    /// restores the invariant.
    pub fn rebuild_day(&mut self, person_id: i64, day: NaiveDate) -> Result<DaySummary, StoreError> {
        self.person(person_id)?;
        let tx = self.immediate_tx()?;
        let summary = rebuild_day_in(&tx, person_id, day)?;
        tx.commit()?;
        info!(person_id, %day, total = summary.total_tasks, "rebuilt day summary");
        Ok(summary)
    }

    /// The fixed 42-cell grid for one person's month: six full weeks starting
    /// on the Sunday on or before the 1st, padded into the adjacent months.
    /// Cells without a materialized summary read as zeros.
    pub fn month_grid(
        &self,
        person_id: i64,
        year: i32,
        month: u32,
    ) -> Result<Vec<DayCell>, StoreError> {
        self.person(person_id)?;
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            StoreError::Validation(format!("invalid calendar month {year}-{month:02}"))
        })?;

        let lead_days = u64::from(first.weekday().num_days_from_sunday());
        let start = first - Days::new(lead_days);
        let end = start + Days::new(GRID_DAYS - 1);

        let by_day: HashMap<NaiveDate, DaySummary> =
            query::day_summaries_between(&self.conn, person_id, start, end)?
                .into_iter()
                .map(|summary| (summary.day, summary))
                .collect();

        let cells = (0..GRID_DAYS)
            .map(|offset| {
                let date = start + Days::new(offset);
                let summary = by_day.get(&date);
                DayCell {
                    date,
                    is_current_month: date.year() == year && date.month() == month,
                    completed_tasks: summary.map_or(0, |s| s.completed_tasks),
                    total_tasks: summary.map_or(0, |s| s.total_tasks),
                    is_level2: summary.is_some_and(|s| s.is_level2),
                }
            })
            .collect();

        Ok(cells)
    }

    /// [`Self::month_grid`] for every person, in creation order.
    pub fn all_month_grids(&self, year: i32, month: u32) -> Result<Vec<PersonMonth>, StoreError> {
        self.people()?
            .into_iter()
            .map(|person| {
                Ok(PersonMonth {
                    days: self.month_grid(person.id, year, month)?,
                    person_id: person.id,
                    name: person.name,
                })
            })
            .collect()
    }
}
