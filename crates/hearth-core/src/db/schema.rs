//! Canonical SQLite schema for hearth.
//!
//! The layout mirrors the domain split:
//! - `people`, `global_tasks`, `personal_tasks` hold the entities
//! - `task_completions` is the per-day completion ledger, uniquely keyed by
//!   (task, person, kind, day) so same-day toggles overwrite instead of append
//! - `day_summaries` is the derived per-(person, day) rollup cache
//! - `store_meta` tracks the schema version for the doctor probe
//!
//! `task_id` in the ledger deliberately has no foreign key: it points into
//! either `global_tasks` or `personal_tasks` depending on `task_kind`.

/// Migration v1: entity tables, ledger, summary cache, and store metadata.
pub const MIGRATION_V1_SQL: &str = r"
CREATE TABLE IF NOT EXISTS people (
    person_id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL CHECK (length(trim(name)) > 0),
    role TEXT NOT NULL,
    theme TEXT NOT NULL DEFAULT 'default'
);

CREATE TABLE IF NOT EXISTS global_tasks (
    task_id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL CHECK (length(trim(title)) > 0)
);

CREATE TABLE IF NOT EXISTS personal_tasks (
    task_id INTEGER PRIMARY KEY AUTOINCREMENT,
    person_id INTEGER NOT NULL REFERENCES people(person_id),
    title TEXT NOT NULL CHECK (length(trim(title)) > 0)
);

CREATE TABLE IF NOT EXISTS task_completions (
    person_id INTEGER NOT NULL,
    task_id INTEGER NOT NULL,
    task_kind TEXT NOT NULL CHECK (task_kind IN ('global', 'personal')),
    completed INTEGER NOT NULL DEFAULT 0 CHECK (completed IN (0, 1)),
    day TEXT NOT NULL CHECK (day GLOB '[0-9][0-9][0-9][0-9]-[0-9][0-9]-[0-9][0-9]'),
    PRIMARY KEY (task_id, person_id, task_kind, day)
);

CREATE TABLE IF NOT EXISTS day_summaries (
    person_id INTEGER NOT NULL,
    day TEXT NOT NULL CHECK (day GLOB '[0-9][0-9][0-9][0-9]-[0-9][0-9]-[0-9][0-9]'),
    completed_tasks INTEGER NOT NULL DEFAULT 0,
    total_tasks INTEGER NOT NULL DEFAULT 0,
    is_level2 INTEGER NOT NULL DEFAULT 0 CHECK (is_level2 IN (0, 1)),
    PRIMARY KEY (person_id, day),
    CHECK (completed_tasks >= 0 AND total_tasks >= completed_tasks)
);

CREATE TABLE IF NOT EXISTS store_meta (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    schema_version INTEGER NOT NULL
);

INSERT OR IGNORE INTO store_meta (id, schema_version) VALUES (1, 1);
";

/// Migration v2: read-path indexes for snapshot, calendar, and cascade sweeps.
pub const MIGRATION_V2_SQL: &str = r"
CREATE INDEX IF NOT EXISTS idx_completions_person_day
    ON task_completions(person_id, day);

CREATE INDEX IF NOT EXISTS idx_completions_task_kind
    ON task_completions(task_id, task_kind);

CREATE INDEX IF NOT EXISTS idx_personal_tasks_person
    ON personal_tasks(person_id);

UPDATE store_meta SET schema_version = 2 WHERE id = 1;
";

/// Indexes expected by the snapshot/calendar/cascade query paths.
pub const REQUIRED_INDEXES: &[&str] = &[
    "idx_completions_person_day",
    "idx_completions_task_kind",
    "idx_personal_tasks_person",
];
