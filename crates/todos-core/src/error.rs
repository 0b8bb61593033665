use std::fmt;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Machine-readable error codes for scripts and front ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    EmptyText,
    TextTooLong,
    EmptyId,
    InvalidFilter,
    InvalidCompleted,
    TaskNotFound,
    ImportMalformed,
    ConfigParseError,
    StoreWriteFailed,
    LockContention,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::EmptyText => "E1001",
            Self::TextTooLong => "E1002",
            Self::EmptyId => "E1003",
            Self::InvalidFilter => "E1004",
            Self::InvalidCompleted => "E1005",
            Self::TaskNotFound => "E2001",
            Self::ImportMalformed => "E3001",
            Self::ConfigParseError => "E4001",
            Self::StoreWriteFailed => "E5001",
            Self::LockContention => "E5002",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::EmptyText => "Task text is empty",
            Self::TextTooLong => "Task text is too long",
            Self::EmptyId => "Task ID is empty",
            Self::InvalidFilter => "Invalid filter value",
            Self::InvalidCompleted => "Invalid completed flag",
            Self::TaskNotFound => "Task not found",
            Self::ImportMalformed => "Import data is malformed",
            Self::ConfigParseError => "Config file parse error",
            Self::StoreWriteFailed => "Store write failed",
            Self::LockContention => "Lock contention",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint for the person at the terminal.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::EmptyText => Some("Provide some non-whitespace text for the task."),
            Self::TextTooLong => Some("Shorten the task text to 200 characters or fewer."),
            Self::EmptyId => Some("Pass the task ID shown by `td list`."),
            Self::InvalidFilter => Some("Use one of: all, completed, pending."),
            Self::InvalidCompleted => Some("Use true or false."),
            Self::TaskNotFound => Some("Run `td list --all` to see existing task IDs."),
            Self::ImportMalformed => Some("Import expects a JSON array as produced by `td export`."),
            Self::ConfigParseError => Some("Fix syntax in the todos config.toml and retry."),
            Self::StoreWriteFailed => Some("Check disk space and write permissions."),
            Self::LockContention => Some("Retry after the other `td` process releases its lock."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Caller-input problems. Never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("task text must not be empty")]
    EmptyText,

    #[error("task text must be at most {max} characters (got {len})")]
    TextTooLong { len: usize, max: usize },

    #[error("task id must not be empty")]
    EmptyId,

    #[error("invalid filter '{0}': expected all, completed, or pending")]
    InvalidFilter(String),

    #[error("invalid completed flag '{0}': expected true or false")]
    InvalidCompleted(String),
}

impl ValidationError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::EmptyText => ErrorCode::EmptyText,
            Self::TextTooLong { .. } => ErrorCode::TextTooLong,
            Self::EmptyId => ErrorCode::EmptyId,
            Self::InvalidFilter(_) => ErrorCode::InvalidFilter,
            Self::InvalidCompleted(_) => ErrorCode::InvalidCompleted,
        }
    }
}

/// Advisory lock errors for the store directory.
#[derive(Debug, Error)]
pub enum LockError {
    #[error("lock timed out after {waited:?} at {}", path.display())]
    Timeout { path: PathBuf, waited: Duration },

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Persistence-layer write/clear failures.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to write store entry '{key}': {source}")]
    Write {
        key: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("failed to remove store entry '{key}': {source}")]
    Remove {
        key: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode store entry '{key}': {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("store is locked: {0}")]
    Lock(#[from] LockError),
}

impl StorageError {
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Lock(LockError::Timeout { .. }) => ErrorCode::LockContention,
            Self::Encode { .. } => ErrorCode::InternalUnexpected,
            Self::Write { .. } | Self::Remove { .. } | Self::Lock(LockError::Io(_)) => {
                ErrorCode::StoreWriteFailed
            }
        }
    }
}

/// Every failure a list operation can surface.
#[derive(Debug, Error)]
pub enum TodoError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("{message}: {source}")]
    Other {
        message: String,
        code: ErrorCode,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

impl TodoError {
    /// Wrap an unexpected failure with a descriptive message.
    pub fn other(
        message: impl Into<String>,
        code: ErrorCode,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Other {
            message: message.into(),
            code,
            source: Box::new(source),
        }
    }

    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    #[must_use]
    pub const fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }

    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::Validation(err) => err.code(),
            Self::Storage(err) => err.code(),
            Self::Other { code, .. } => *code,
        }
    }

    /// Remediation text suitable for terminal output.
    #[must_use]
    pub fn suggestion(&self) -> String {
        let code = self.error_code();
        code.hint().unwrap_or_else(|| code.message()).to_string()
    }
}

pub type Result<T, E = TodoError> = std::result::Result<T, E>;
