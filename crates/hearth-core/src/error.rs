use std::fmt;

/// Machine-readable error codes for scripting-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    PersonNotFound,
    TaskNotFound,
    CompletionNotFound,
    InvalidTaskKind,
    ValidationFailed,
    CorruptSummary,
    StorageFailure,
    LockContention,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::PersonNotFound => "E2001",
            Self::TaskNotFound => "E2002",
            Self::CompletionNotFound => "E2003",
            Self::InvalidTaskKind => "E2004",
            Self::ValidationFailed => "E2005",
            Self::CorruptSummary => "E3001",
            Self::StorageFailure => "E5001",
            Self::LockContention => "E5002",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::PersonNotFound => "Person not found",
            Self::TaskNotFound => "Task not found",
            Self::CompletionNotFound => "Completion entry not found",
            Self::InvalidTaskKind => "Invalid task kind value",
            Self::ValidationFailed => "Input validation failed",
            Self::CorruptSummary => "Day summary out of sync with ledger",
            Self::StorageFailure => "Storage operation failed",
            Self::LockContention => "Lock contention",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in hearth/config.toml and retry."),
            Self::PersonNotFound | Self::TaskNotFound | Self::CompletionNotFound => None,
            Self::InvalidTaskKind => Some("Use one of: global, personal."),
            Self::ValidationFailed => Some("Check required fields and value shapes."),
            Self::CorruptSummary => {
                Some("Run `hearth rebuild-day` for the affected person and day.")
            }
            Self::StorageFailure => Some("Check disk space and database file permissions."),
            Self::LockContention => {
                Some("Retry after the other `hearth` process releases its lock.")
            }
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// The kinds of entity an operation can fail to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Person,
    GlobalTask,
    PersonalTask,
}

impl Entity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::GlobalTask => "global task",
            Self::PersonalTask => "personal task",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operational error taxonomy for the store.
///
/// Every mutating operation either fully succeeds or fails with one of these;
/// cascades run inside a single transaction so partial states never persist.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A referenced entity id does not exist. Surfaced to the caller, not retried.
    #[error("{what} {id} not found")]
    NotFound { what: Entity, id: i64 },

    /// Malformed input, rejected before any mutation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Underlying persistence call failed. Not retried automatically.
    #[error("storage failure: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl StoreError {
    /// Machine-readable code associated with this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound { what, .. } => match what {
                Entity::Person => ErrorCode::PersonNotFound,
                Entity::GlobalTask | Entity::PersonalTask => ErrorCode::TaskNotFound,
            },
            Self::Validation(_) => ErrorCode::ValidationFailed,
            Self::Storage(_) => ErrorCode::StorageFailure,
        }
    }

    /// Optional remediation hint for operators.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        self.code().hint()
    }
}
