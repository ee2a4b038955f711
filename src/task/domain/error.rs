//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned by task domain operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task identifier is empty after trimming.
    #[error("task identifier must not be empty")]
    EmptyTaskId,

    /// The operation needs a task that has already been persisted.
    #[error("task has not been persisted yet and has no identifier")]
    Unpersisted,

    /// The subtask index does not address an existing subtask.
    #[error("subtask index {index} is out of range for {len} subtasks")]
    SubtaskIndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of subtasks on the task.
        len: usize,
    },
}

/// Error returned while parsing board column names.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task type: {0}")]
pub struct ParseTaskTypeError(pub String);

/// Error returned while parsing priority names.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown priority: {0}")]
pub struct ParsePriorityError(pub String);
