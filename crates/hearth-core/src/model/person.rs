use super::task::TaskStatus;
use serde::{Deserialize, Serialize};

/// A tracked family member.
///
/// `theme` is a display preference carried through storage untouched; it never
/// participates in completion or summary logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub theme: String,
}

/// Fields required to create a person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPerson {
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub theme: Option<String>,
}

/// Partial update for a person; unset fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
}

impl PersonPatch {
    /// True when no field is set; an empty patch is rejected before touching storage.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.role.is_none() && self.theme.is_none()
    }
}

/// A person's live view: identity, today's task list, and derived metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonSnapshot {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub theme: String,
    pub global_tasks: Vec<TaskStatus>,
    pub personal_tasks: Vec<TaskStatus>,
    pub completed_tasks: u32,
    pub total_tasks: u32,
    /// Percentage 0..=100, rounded half-up; 0 when there are no tasks.
    pub progress: u8,
    pub is_level2: bool,
}

#[cfg(test)]
mod tests {
    use super::PersonPatch;

    #[test]
    fn empty_patch_is_detected() {
        assert!(PersonPatch::default().is_empty());
        let named = PersonPatch {
            name: Some("Isaac".into()),
            ..PersonPatch::default()
        };
        assert!(!named.is_empty());
    }
}
