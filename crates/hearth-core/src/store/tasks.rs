//! Global and personal task CRUD, including the deletion cascade that
//! retracts a task's effect from historical day summaries.

use rusqlite::params;
use tracing::info;

use super::{Store, calendar};
use crate::db::query;
use crate::error::{Entity, StoreError};
use crate::model::{GlobalTask, PersonalTask, TaskKind};

fn validate_title(title: &str) -> Result<&str, StoreError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(StoreError::Validation("task title must not be empty".into()));
    }
    Ok(trimmed)
}

impl Store {
    /// List every global task in creation order.
    pub fn global_tasks(&self) -> Result<Vec<GlobalTask>, StoreError> {
        Ok(query::list_global_tasks(&self.conn)?)
    }

    /// List one person's personal tasks, signalling `NotFound` for a missing person.
    pub fn personal_tasks(&self, person_id: i64) -> Result<Vec<PersonalTask>, StoreError> {
        self.person(person_id)?;
        Ok(query::list_personal_tasks(&self.conn, person_id)?)
    }

    /// Create a chore applicable to every person. Applicability is computed at
    /// read time; no completion rows are backfilled.
    pub fn create_global_task(&mut self, title: &str) -> Result<GlobalTask, StoreError> {
        let title = validate_title(title)?;
        self.conn
            .execute("INSERT INTO global_tasks (title) VALUES (?1)", params![title])?;
        let id = self.conn.last_insert_rowid();
        info!(task_id = id, title, "created global task");
        Ok(GlobalTask {
            id,
            title: title.to_string(),
        })
    }

    /// Rename a global task.
    pub fn update_global_task(&mut self, id: i64, title: &str) -> Result<GlobalTask, StoreError> {
        let title = validate_title(title)?;
        if query::get_global_task(&self.conn, id)?.is_none() {
            return Err(StoreError::NotFound {
                what: Entity::GlobalTask,
                id,
            });
        }
        self.conn.execute(
            "UPDATE global_tasks SET title = ?2 WHERE task_id = ?1",
            params![id, title],
        )?;
        Ok(GlobalTask {
            id,
            title: title.to_string(),
        })
    }

    /// Delete a global task, retracting its effect from every person's
    /// history: each affected day summary is decremented in place and its
    /// Level-2 flag re-evaluated, then the ledger rows and the task go.
    /// One transaction end to end.
    pub fn delete_global_task(&mut self, id: i64) -> Result<(), StoreError> {
        let tx = self.immediate_tx()?;

        if query::get_global_task(&tx, id)?.is_none() {
            return Err(StoreError::NotFound {
                what: Entity::GlobalTask,
                id,
            });
        }

        let entries = query::completions_for_task(&tx, id, TaskKind::Global)?;
        for entry in &entries {
            calendar::retract_completion(&tx, entry.person_id, entry.day, entry.completed)?;
        }
        tx.execute(
            "DELETE FROM task_completions WHERE task_id = ?1 AND task_kind = 'global'",
            params![id],
        )?;
        tx.execute("DELETE FROM global_tasks WHERE task_id = ?1", params![id])?;

        tx.commit()?;
        info!(
            task_id = id,
            retracted = entries.len(),
            "deleted global task and adjusted summaries"
        );
        Ok(())
    }

    /// Create a chore owned by exactly one person.
    pub fn create_personal_task(
        &mut self,
        person_id: i64,
        title: &str,
    ) -> Result<PersonalTask, StoreError> {
        let title = validate_title(title)?;
        self.person(person_id)?;

        self.conn.execute(
            "INSERT INTO personal_tasks (person_id, title) VALUES (?1, ?2)",
            params![person_id, title],
        )?;
        let id = self.conn.last_insert_rowid();
        info!(task_id = id, person_id, title, "created personal task");
        Ok(PersonalTask {
            id,
            person_id,
            title: title.to_string(),
        })
    }

    /// Rename a personal task.
    pub fn update_personal_task(
        &mut self,
        id: i64,
        title: &str,
    ) -> Result<PersonalTask, StoreError> {
        let title = validate_title(title)?;
        let Some(existing) = query::get_personal_task(&self.conn, id)? else {
            return Err(StoreError::NotFound {
                what: Entity::PersonalTask,
                id,
            });
        };
        self.conn.execute(
            "UPDATE personal_tasks SET title = ?2 WHERE task_id = ?1",
            params![id, title],
        )?;
        Ok(PersonalTask {
            id,
            person_id: existing.person_id,
            title: title.to_string(),
        })
    }

    /// Delete a personal task with the same summary retraction as
    /// [`Self::delete_global_task`], scoped to the one owner.
    pub fn delete_personal_task(&mut self, id: i64) -> Result<(), StoreError> {
        let tx = self.immediate_tx()?;

        let Some(task) = query::get_personal_task(&tx, id)? else {
            return Err(StoreError::NotFound {
                what: Entity::PersonalTask,
                id,
            });
        };

        let entries = query::completions_for_task(&tx, id, TaskKind::Personal)?;
        for entry in &entries {
            calendar::retract_completion(&tx, entry.person_id, entry.day, entry.completed)?;
        }
        tx.execute(
            "DELETE FROM task_completions WHERE task_id = ?1 AND task_kind = 'personal'",
            params![id],
        )?;
        tx.execute("DELETE FROM personal_tasks WHERE task_id = ?1", params![id])?;

        tx.commit()?;
        info!(
            task_id = id,
            person_id = task.person_id,
            retracted = entries.len(),
            "deleted personal task and adjusted summaries"
        );
        Ok(())
    }
}
