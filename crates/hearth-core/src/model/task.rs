use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The two kinds of chore.
///
/// A global task applies to every tracked person; a personal task is owned by
/// exactly one. Completion ledger rows carry the kind because global and
/// personal task ids live in separate sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Global,
    Personal,
}

impl TaskKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Personal => "personal",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "global" => Ok(Self::Global),
            "personal" => Ok(Self::Personal),
            other => bail!("unknown task kind '{other}': expected global or personal"),
        }
    }
}

/// A chore template applicable to every tracked person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalTask {
    pub id: i64,
    pub title: String,
}

/// A chore owned by exactly one tracked person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalTask {
    pub id: i64,
    pub person_id: i64,
    pub title: String,
}

/// A task as it appears in a person's live snapshot: identity plus today's
/// completion state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatus {
    pub id: i64,
    pub title: String,
    pub completed: bool,
    pub kind: TaskKind,
}
