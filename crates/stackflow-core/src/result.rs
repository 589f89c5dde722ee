//! Tagged operation outcomes
//!
//! `Failed` and `TimedOut` are values rather than errors so the caller can
//! decide the exit code; local errors (IO, JSON, missing files) still travel
//! through `Result`.

use std::fmt;

/// Outcome of one stack apply or teardown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationResult {
    /// Stack did not exist and was created
    Created,
    /// Stack existed and was updated
    Updated,
    /// Update submitted but the changeset was empty (success)
    NoOpChangeset,
    /// Stack was deleted
    Deleted,
    /// Stack was already absent; teardown is idempotent
    AlreadyAbsent,
    /// The provisioning service rejected or rolled back the operation
    Failed(String),
    /// No terminal status within the wait bound; the remote operation may
    /// still be running
    TimedOut,
}

impl OperationResult {
    pub fn is_success(&self) -> bool {
        !matches!(
            self,
            OperationResult::Failed(_) | OperationResult::TimedOut
        )
    }
}

impl fmt::Display for OperationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationResult::Created => write!(f, "created"),
            OperationResult::Updated => write!(f, "updated"),
            OperationResult::NoOpChangeset => write!(f, "no changes"),
            OperationResult::Deleted => write!(f, "deleted"),
            OperationResult::AlreadyAbsent => write!(f, "already absent"),
            OperationResult::Failed(reason) => write!(f, "failed: {}", reason),
            OperationResult::TimedOut => write!(f, "timed out"),
        }
    }
}
