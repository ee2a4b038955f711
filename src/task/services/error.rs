//! Service-level error taxonomy.

use crate::task::{
    domain::{TaskDomainError, TaskId},
    ports::DocumentStoreError,
};
use thiserror::Error;

/// Errors returned by task board services.
///
/// Malformed stored data is never reported here; the codec recovers it with
/// defaults.
#[derive(Debug, Error)]
pub enum TaskSyncError {
    /// Domain validation failed (missing id, bad subtask index).
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// A live or one-shot read from the store failed.
    #[error("remote read failed: {0}")]
    RemoteRead(DocumentStoreError),

    /// A create, update or delete call failed. Never retried.
    #[error("remote write failed: {0}")]
    RemoteWrite(DocumentStoreError),

    /// The task is not present in the current cache, usually because it was
    /// deleted remotely after being opened.
    #[error("task {0} is not in the local cache")]
    NotFoundLocal(TaskId),
}

/// Result type for task board service operations.
pub type TaskSyncResult<T> = Result<T, TaskSyncError>;
