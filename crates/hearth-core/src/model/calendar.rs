use super::task::TaskKind;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily true/false record of whether a person finished a specific task.
///
/// Identity is the tuple (person, task, kind, day); the store enforces at most
/// one row per tuple, so a same-day re-toggle overwrites in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionEntry {
    pub person_id: i64,
    pub task_id: i64,
    pub task_kind: TaskKind,
    pub completed: bool,
    pub day: NaiveDate,
}

/// Cached daily rollup for one person: counts plus the Level-2 flag.
///
/// Derived solely from the completion ledger. `total_tasks` counts the ledger
/// rows recorded for that day, not the tasks currently defined, so creating a
/// task later never rewrites history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySummary {
    pub person_id: i64,
    pub day: NaiveDate,
    pub completed_tasks: u32,
    pub total_tasks: u32,
    pub is_level2: bool,
}

impl DaySummary {
    /// The Level-2 rule: every recorded task that day completed, and at least one recorded.
    #[must_use]
    pub const fn level2(completed: u32, total: u32) -> bool {
        total > 0 && completed == total
    }
}

/// One cell of the 42-cell month grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub is_current_month: bool,
    pub completed_tasks: u32,
    pub total_tasks: u32,
    pub is_level2: bool,
}

/// A person's month grid, as returned by the all-people calendar view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonMonth {
    pub person_id: i64,
    pub name: String,
    pub days: Vec<DayCell>,
}
