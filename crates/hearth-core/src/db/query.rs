//! SQLite query helpers for the hearth store.
//!
//! Thin read-side mappers: each function takes a shared `&Connection` and
//! returns typed model structs (never raw rows). The [`crate::store`] layer
//! owns validation and the error taxonomy; everything here surfaces plain
//! `rusqlite::Result` so storage failures wrap uniformly.

use chrono::NaiveDate;
use rusqlite::{Connection, Row, params, types::Type};
use std::str::FromStr;

use crate::model::{CompletionEntry, DaySummary, GlobalTask, Person, PersonalTask, TaskKind};

fn kind_from_sql(idx: usize, raw: &str) -> rusqlite::Result<TaskKind> {
    TaskKind::from_str(raw)
        .map_err(|error| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, error.into()))
}

fn row_to_person(row: &Row<'_>) -> rusqlite::Result<Person> {
    Ok(Person {
        id: row.get(0)?,
        name: row.get(1)?,
        role: row.get(2)?,
        theme: row.get(3)?,
    })
}

fn row_to_global_task(row: &Row<'_>) -> rusqlite::Result<GlobalTask> {
    Ok(GlobalTask {
        id: row.get(0)?,
        title: row.get(1)?,
    })
}

fn row_to_personal_task(row: &Row<'_>) -> rusqlite::Result<PersonalTask> {
    Ok(PersonalTask {
        id: row.get(0)?,
        person_id: row.get(1)?,
        title: row.get(2)?,
    })
}

fn row_to_completion(row: &Row<'_>) -> rusqlite::Result<CompletionEntry> {
    let raw_kind: String = row.get(2)?;
    Ok(CompletionEntry {
        person_id: row.get(0)?,
        task_id: row.get(1)?,
        task_kind: kind_from_sql(2, &raw_kind)?,
        completed: row.get(3)?,
        day: row.get(4)?,
    })
}

fn row_to_summary(row: &Row<'_>) -> rusqlite::Result<DaySummary> {
    Ok(DaySummary {
        person_id: row.get(0)?,
        day: row.get(1)?,
        completed_tasks: row.get(2)?,
        total_tasks: row.get(3)?,
        is_level2: row.get(4)?,
    })
}

fn optional<T>(result: rusqlite::Result<T>) -> rusqlite::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(error) => Err(error),
    }
}

/// Fetch a single person by id.
pub fn get_person(conn: &Connection, id: i64) -> rusqlite::Result<Option<Person>> {
    let mut stmt =
        conn.prepare("SELECT person_id, name, role, theme FROM people WHERE person_id = ?1")?;
    optional(stmt.query_row(params![id], row_to_person))
}

/// List every person in creation order.
pub fn list_people(conn: &Connection) -> rusqlite::Result<Vec<Person>> {
    let mut stmt =
        conn.prepare("SELECT person_id, name, role, theme FROM people ORDER BY person_id")?;
    stmt.query_map([], row_to_person)?.collect()
}

/// Fetch a single global task by id.
pub fn get_global_task(conn: &Connection, id: i64) -> rusqlite::Result<Option<GlobalTask>> {
    let mut stmt = conn.prepare("SELECT task_id, title FROM global_tasks WHERE task_id = ?1")?;
    optional(stmt.query_row(params![id], row_to_global_task))
}

/// List every global task in creation order.
pub fn list_global_tasks(conn: &Connection) -> rusqlite::Result<Vec<GlobalTask>> {
    let mut stmt = conn.prepare("SELECT task_id, title FROM global_tasks ORDER BY task_id")?;
    stmt.query_map([], row_to_global_task)?.collect()
}

/// Fetch a single personal task by id.
pub fn get_personal_task(conn: &Connection, id: i64) -> rusqlite::Result<Option<PersonalTask>> {
    let mut stmt = conn
        .prepare("SELECT task_id, person_id, title FROM personal_tasks WHERE task_id = ?1")?;
    optional(stmt.query_row(params![id], row_to_personal_task))
}

/// List one person's personal tasks in creation order.
pub fn list_personal_tasks(conn: &Connection, person_id: i64) -> rusqlite::Result<Vec<PersonalTask>> {
    let mut stmt = conn.prepare(
        "SELECT task_id, person_id, title FROM personal_tasks
         WHERE person_id = ?1 ORDER BY task_id",
    )?;
    stmt.query_map(params![person_id], row_to_personal_task)?
        .collect()
}

/// All ledger rows for a person, across every day.
pub fn completions_for_person(
    conn: &Connection,
    person_id: i64,
) -> rusqlite::Result<Vec<CompletionEntry>> {
    let mut stmt = conn.prepare(
        "SELECT person_id, task_id, task_kind, completed, day
         FROM task_completions WHERE person_id = ?1
         ORDER BY day, task_kind, task_id",
    )?;
    stmt.query_map(params![person_id], row_to_completion)?
        .collect()
}

/// Ledger rows for one person on one calendar day.
pub fn completions_for_day(
    conn: &Connection,
    person_id: i64,
    day: NaiveDate,
) -> rusqlite::Result<Vec<CompletionEntry>> {
    let mut stmt = conn.prepare(
        "SELECT person_id, task_id, task_kind, completed, day
         FROM task_completions WHERE person_id = ?1 AND day = ?2
         ORDER BY task_kind, task_id",
    )?;
    stmt.query_map(params![person_id, day], row_to_completion)?
        .collect()
}

/// The ledger row for one (person, task, kind, day) tuple, if recorded.
pub fn completion_for(
    conn: &Connection,
    person_id: i64,
    task_id: i64,
    kind: TaskKind,
    day: NaiveDate,
) -> rusqlite::Result<Option<CompletionEntry>> {
    let mut stmt = conn.prepare(
        "SELECT person_id, task_id, task_kind, completed, day
         FROM task_completions
         WHERE person_id = ?1 AND task_id = ?2 AND task_kind = ?3 AND day = ?4",
    )?;
    optional(stmt.query_row(
        params![person_id, task_id, kind.as_str(), day],
        row_to_completion,
    ))
}

/// Every ledger row referencing one task, across all people and days.
///
/// This is the sweep used by task deletion to find which historical day
/// summaries must be adjusted.
pub fn completions_for_task(
    conn: &Connection,
    task_id: i64,
    kind: TaskKind,
) -> rusqlite::Result<Vec<CompletionEntry>> {
    let mut stmt = conn.prepare(
        "SELECT person_id, task_id, task_kind, completed, day
         FROM task_completions WHERE task_id = ?1 AND task_kind = ?2
         ORDER BY person_id, day",
    )?;
    stmt.query_map(params![task_id, kind.as_str()], row_to_completion)?
        .collect()
}

/// The cached rollup for one (person, day), if materialized.
pub fn day_summary(
    conn: &Connection,
    person_id: i64,
    day: NaiveDate,
) -> rusqlite::Result<Option<DaySummary>> {
    let mut stmt = conn.prepare(
        "SELECT person_id, day, completed_tasks, total_tasks, is_level2
         FROM day_summaries WHERE person_id = ?1 AND day = ?2",
    )?;
    optional(stmt.query_row(params![person_id, day], row_to_summary))
}

/// Cached rollups for one person across an inclusive day range.
pub fn day_summaries_between(
    conn: &Connection,
    person_id: i64,
    start: NaiveDate,
    end: NaiveDate,
) -> rusqlite::Result<Vec<DaySummary>> {
    let mut stmt = conn.prepare(
        "SELECT person_id, day, completed_tasks, total_tasks, is_level2
         FROM day_summaries
         WHERE person_id = ?1 AND day >= ?2 AND day <= ?3
         ORDER BY day",
    )?;
    stmt.query_map(params![person_id, start, end], row_to_summary)?
        .collect()
}
