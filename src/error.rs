use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskqError {
    #[error("task name must not be empty")]
    InvalidName,

    #[error("priority must be an integer (got '{0}')")]
    InvalidPriority(String),

    #[error("task '{0}' already exists")]
    DuplicateName(String),

    #[error("unknown dependencies: {}", .0.join(", "))]
    UnknownDependency(Vec<String>),

    #[error("task '{0}' not found")]
    NotFound(String),

    #[error("dependencies not completed yet: {}", .0.join(", "))]
    UnmetDependencies(Vec<String>),

    #[error("other tasks still depend on this one: {}", .0.join(", "))]
    BlockedByDependents(Vec<String>),

    #[error("invalid deadline '{0}' (expected YYYY-MM-DD)")]
    InvalidDeadline(String),

    #[error("locked by another process: {0}")]
    Locked(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TaskqError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidName => "invalid_name",
            Self::InvalidPriority(_) => "invalid_priority",
            Self::DuplicateName(_) => "duplicate_name",
            Self::UnknownDependency(_) => "unknown_dependency",
            Self::NotFound(_) => "not_found",
            Self::UnmetDependencies(_) => "unmet_dependencies",
            Self::BlockedByDependents(_) => "blocked_by_dependents",
            Self::InvalidDeadline(_) => "invalid_deadline",
            Self::Locked(_) => "locked",
            Self::Io(_) => "io_error",
            Self::Json(_) => "json_error",
        }
    }

    /// Completion-legality refusals: reported to the caller, never a sign of
    /// corrupted state.
    pub fn is_refusal(&self) -> bool {
        matches!(
            self,
            Self::UnmetDependencies(_) | Self::BlockedByDependents(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, TaskqError>;
