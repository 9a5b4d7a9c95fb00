//! The completion ledger: per-day, per-task completion state.
//!
//! One row per (task, person, kind, day) tuple. A second toggle on the same
//! day overwrites in place; completion is per-day idempotent state, not an
//! event stream. Every upsert synchronously recomputes the affected day
//! summary inside the same transaction.

use chrono::NaiveDate;
use rusqlite::params;
use tracing::debug;

use super::{Store, calendar};
use crate::db::query;
use crate::error::{Entity, StoreError};
use crate::model::{CompletionEntry, TaskKind};

impl Store {
    /// Record (or overwrite) today's completion state for one task.
    pub fn set_completion(
        &mut self,
        person_id: i64,
        task_id: i64,
        kind: TaskKind,
        completed: bool,
    ) -> Result<CompletionEntry, StoreError> {
        self.set_completion_on(person_id, task_id, kind, completed, Self::today())
    }

    /// Day-explicit variant of [`Self::set_completion`]. The referenced person
    /// and task must exist; a personal task must be owned by `person_id`.
    pub fn set_completion_on(
        &mut self,
        person_id: i64,
        task_id: i64,
        kind: TaskKind,
        completed: bool,
        day: NaiveDate,
    ) -> Result<CompletionEntry, StoreError> {
        self.person(person_id)?;
        match kind {
            TaskKind::Global => {
                if query::get_global_task(&self.conn, task_id)?.is_none() {
                    return Err(StoreError::NotFound {
                        what: Entity::GlobalTask,
                        id: task_id,
                    });
                }
            }
            TaskKind::Personal => {
                let Some(task) = query::get_personal_task(&self.conn, task_id)? else {
                    return Err(StoreError::NotFound {
                        what: Entity::PersonalTask,
                        id: task_id,
                    });
                };
                if task.person_id != person_id {
                    return Err(StoreError::Validation(format!(
                        "personal task {task_id} is not owned by person {person_id}"
                    )));
                }
            }
        }

        let tx = self.immediate_tx()?;
        tx.execute(
            "INSERT INTO task_completions (person_id, task_id, task_kind, completed, day)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT (task_id, person_id, task_kind, day)
             DO UPDATE SET completed = excluded.completed, day = excluded.day",
            params![person_id, task_id, kind.as_str(), completed, day],
        )?;
        let summary = calendar::rebuild_day_in(&tx, person_id, day)?;
        tx.commit()?;

        debug!(
            person_id,
            task_id,
            kind = %kind,
            completed,
            %day,
            day_total = summary.total_tasks,
            day_completed = summary.completed_tasks,
            "recorded completion"
        );

        Ok(CompletionEntry {
            person_id,
            task_id,
            task_kind: kind,
            completed,
            day,
        })
    }

    /// All ledger rows for a person, across every day. Historical rows are
    /// retained for the calendar; the snapshot never reads them.
    pub fn completions(&self, person_id: i64) -> Result<Vec<CompletionEntry>, StoreError> {
        self.person(person_id)?;
        Ok(query::completions_for_person(&self.conn, person_id)?)
    }

    /// The ledger row for one tuple on one day, if recorded.
    pub fn completion(
        &self,
        person_id: i64,
        task_id: i64,
        kind: TaskKind,
        day: NaiveDate,
    ) -> Result<Option<CompletionEntry>, StoreError> {
        self.person(person_id)?;
        Ok(query::completion_for(
            &self.conn, person_id, task_id, kind, day,
        )?)
    }
}
