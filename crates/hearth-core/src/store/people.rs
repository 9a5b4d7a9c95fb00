//! Person CRUD and the person-scoped cascade.

use rusqlite::params;
use tracing::info;

use super::Store;
use crate::db::query;
use crate::error::{Entity, StoreError};
use crate::model::{NewPerson, Person, PersonPatch};

impl Store {
    /// Fetch a person, signalling `NotFound` for a missing id.
    pub fn person(&self, id: i64) -> Result<Person, StoreError> {
        query::get_person(&self.conn, id)?.ok_or(StoreError::NotFound {
            what: Entity::Person,
            id,
        })
    }

    /// List every person in creation order.
    pub fn people(&self) -> Result<Vec<Person>, StoreError> {
        Ok(query::list_people(&self.conn)?)
    }

    /// Create a person. `theme` defaults to `"default"` when unset.
    pub fn create_person(&mut self, new: &NewPerson) -> Result<Person, StoreError> {
        let name = new.name.trim();
        if name.is_empty() {
            return Err(StoreError::Validation("person name must not be empty".into()));
        }
        let theme = new.theme.as_deref().unwrap_or("default");

        self.conn.execute(
            "INSERT INTO people (name, role, theme) VALUES (?1, ?2, ?3)",
            params![name, new.role, theme],
        )?;
        let id = self.conn.last_insert_rowid();
        info!(person_id = id, name, "created person");

        Ok(Person {
            id,
            name: name.to_string(),
            role: new.role.clone(),
            theme: theme.to_string(),
        })
    }

    /// Apply a partial update; unset fields keep their stored value.
    pub fn update_person(&mut self, id: i64, patch: &PersonPatch) -> Result<Person, StoreError> {
        if patch.is_empty() {
            return Err(StoreError::Validation("update requires at least one field".into()));
        }
        if let Some(name) = &patch.name {
            if name.trim().is_empty() {
                return Err(StoreError::Validation("person name must not be empty".into()));
            }
        }

        let existing = self.person(id)?;
        let updated = Person {
            id,
            name: patch
                .name
                .as_deref()
                .map_or(existing.name, |n| n.trim().to_string()),
            role: patch.role.clone().unwrap_or(existing.role),
            theme: patch.theme.clone().unwrap_or(existing.theme),
        };

        self.conn.execute(
            "UPDATE people SET name = ?2, role = ?3, theme = ?4 WHERE person_id = ?1",
            params![id, updated.name, updated.role, updated.theme],
        )?;

        Ok(updated)
    }

    /// Delete a person and everything keyed to them: ledger rows, personal
    /// tasks, and day summaries. Runs as one transaction.
    pub fn delete_person(&mut self, id: i64) -> Result<(), StoreError> {
        let tx = self.immediate_tx()?;

        if query::get_person(&tx, id)?.is_none() {
            return Err(StoreError::NotFound {
                what: Entity::Person,
                id,
            });
        }

        let completions =
            tx.execute("DELETE FROM task_completions WHERE person_id = ?1", params![id])?;
        let tasks = tx.execute("DELETE FROM personal_tasks WHERE person_id = ?1", params![id])?;
        let summaries =
            tx.execute("DELETE FROM day_summaries WHERE person_id = ?1", params![id])?;
        tx.execute("DELETE FROM people WHERE person_id = ?1", params![id])?;

        tx.commit()?;
        info!(
            person_id = id,
            completions, tasks, summaries, "deleted person and cascaded rows"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    fn store() -> Store {
        Store::open_in_memory().expect("open store")
    }

    fn isaac() -> NewPerson {
        NewPerson {
            name: "Isaac".into(),
            role: "kid".into(),
            theme: None,
        }
    }

    #[test]
    fn create_assigns_sequential_ids_and_default_theme() {
        let mut store = store();
        let first = store.create_person(&isaac()).expect("create");
        let second = store
            .create_person(&NewPerson {
                name: "Mara".into(),
                role: "parent".into(),
                theme: Some("forest".into()),
            })
            .expect("create");

        assert_eq!(first.id, 1);
        assert_eq!(first.theme, "default");
        assert_eq!(second.id, 2);
        assert_eq!(second.theme, "forest");
    }

    #[test]
    fn create_rejects_blank_name() {
        let mut store = store();
        let err = store
            .create_person(&NewPerson {
                name: "   ".into(),
                role: "kid".into(),
                theme: None,
            })
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[test]
    fn update_merges_partial_fields() {
        let mut store = store();
        let person = store.create_person(&isaac()).expect("create");

        let updated = store
            .update_person(
                person.id,
                &PersonPatch {
                    role: Some("teen".into()),
                    ..PersonPatch::default()
                },
            )
            .expect("update");

        assert_eq!(updated.name, "Isaac");
        assert_eq!(updated.role, "teen");
        assert_eq!(store.person(person.id).expect("reload").role, "teen");
    }

    #[test]
    fn update_missing_person_is_not_found() {
        let mut store = store();
        let err = store
            .update_person(
                42,
                &PersonPatch {
                    name: Some("Ghost".into()),
                    ..PersonPatch::default()
                },
            )
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::NotFound {
                what: Entity::Person,
                id: 42
            }
        ));
    }

    #[test]
    fn empty_patch_is_rejected_before_lookup() {
        let mut store = store();
        let err = store.update_person(1, &PersonPatch::default()).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[test]
    fn delete_missing_person_is_not_found() {
        let mut store = store();
        assert!(matches!(
            store.delete_person(9).unwrap_err(),
            StoreError::NotFound { .. }
        ));
    }
}
