//! The snapshot aggregator: a person's live task list and derived metrics.
//!
//! Snapshot lookups are pinned to a single calendar day (today at the public
//! surface). Older ledger rows are never consulted here; they exist solely
//! for the calendar materializer.

use chrono::NaiveDate;
use std::collections::HashMap;

use super::Store;
use crate::db::query;
use crate::error::StoreError;
use crate::model::{DaySummary, PersonSnapshot, TaskKind, TaskStatus};

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn progress_percent(completed: u32, total: u32) -> u8 {
    if total == 0 {
        0
    } else {
        ((f64::from(completed) / f64::from(total)) * 100.0).round() as u8
    }
}

impl Store {
    /// A person's live view as of today.
    pub fn person_snapshot(&self, person_id: i64) -> Result<PersonSnapshot, StoreError> {
        self.person_snapshot_on(person_id, Self::today())
    }

    /// Day-explicit variant of [`Self::person_snapshot`].
    ///
    /// Every global task applies unconditionally; personal tasks are the
    /// person's own. Completion state comes from the given day's ledger rows,
    /// defaulting to incomplete when no row exists.
    pub fn person_snapshot_on(
        &self,
        person_id: i64,
        day: NaiveDate,
    ) -> Result<PersonSnapshot, StoreError> {
        let person = self.person(person_id)?;
        let globals = query::list_global_tasks(&self.conn)?;
        let personals = query::list_personal_tasks(&self.conn, person_id)?;

        let completed_by_key: HashMap<(i64, TaskKind), bool> =
            query::completions_for_day(&self.conn, person_id, day)?
                .into_iter()
                .map(|entry| ((entry.task_id, entry.task_kind), entry.completed))
                .collect();

        let status = |id: i64, title: String, kind: TaskKind| TaskStatus {
            completed: completed_by_key.get(&(id, kind)).copied().unwrap_or(false),
            id,
            title,
            kind,
        };

        let global_tasks: Vec<TaskStatus> = globals
            .into_iter()
            .map(|task| status(task.id, task.title, TaskKind::Global))
            .collect();
        let personal_tasks: Vec<TaskStatus> = personals
            .into_iter()
            .map(|task| status(task.id, task.title, TaskKind::Personal))
            .collect();

        let total_tasks =
            u32::try_from(global_tasks.len() + personal_tasks.len()).unwrap_or(u32::MAX);
        let completed_tasks = u32::try_from(
            global_tasks
                .iter()
                .chain(&personal_tasks)
                .filter(|task| task.completed)
                .count(),
        )
        .unwrap_or(u32::MAX);

        Ok(PersonSnapshot {
            id: person.id,
            name: person.name,
            role: person.role,
            theme: person.theme,
            global_tasks,
            personal_tasks,
            completed_tasks,
            total_tasks,
            progress: progress_percent(completed_tasks, total_tasks),
            is_level2: DaySummary::level2(completed_tasks, total_tasks),
        })
    }

    /// Today's snapshot for every person, in creation order.
    pub fn all_snapshots(&self) -> Result<Vec<PersonSnapshot>, StoreError> {
        let day = Self::today();
        query::list_people(&self.conn)?
            .into_iter()
            .map(|person| self.person_snapshot_on(person.id, day))
            .collect()
    }
}
