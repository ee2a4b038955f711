//! Subtask mutations persisted through the task repository.

use super::{TaskRepository, TaskSyncResult};
use crate::task::{codec, domain::Task, ports::DocumentStore};

/// Subtask manager service.
///
/// The store has no partial subtask endpoint: toggles resend the whole task
/// and deletions resend the whole subtask array.
pub struct SubtaskManager<S>
where
    S: DocumentStore,
{
    repository: TaskRepository<S>,
}

impl<S> SubtaskManager<S>
where
    S: DocumentStore,
{
    /// Creates a subtask manager writing through `repository`.
    #[must_use]
    pub const fn new(repository: TaskRepository<S>) -> Self {
        Self { repository }
    }

    /// Persists a task whose subtask flags the caller has already changed.
    ///
    /// Behaves like [`TaskRepository::update`], including the silent skip for
    /// unpersisted tasks.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskSyncError::RemoteWrite`] when the store rejects
    /// the write.
    pub async fn toggle(&self, task: &Task) -> TaskSyncResult<()> {
        self.repository.update(task).await
    }

    /// Flips the subtask at `index` and persists the whole task. Returns the
    /// new checked state.
    ///
    /// # Errors
    ///
    /// Returns a domain error for an out-of-range index (the task is left
    /// untouched) or [`super::TaskSyncError::RemoteWrite`] when the store
    /// rejects the write.
    pub async fn toggle_at(&self, task: &mut Task, index: usize) -> TaskSyncResult<bool> {
        let is_checked = task.toggle_subtask(index)?;
        self.repository.update(task).await?;
        Ok(is_checked)
    }

    /// Removes the subtask at `index` and persists only the subtask array.
    ///
    /// # Errors
    ///
    /// Returns a domain error when the task has no id or the index is out of
    /// range (the task is left untouched in both cases), or
    /// [`super::TaskSyncError::RemoteWrite`] when the store rejects the
    /// write.
    pub async fn delete_subtask(&self, task: &mut Task, index: usize) -> TaskSyncResult<()> {
        let id = task.require_id()?.clone();
        task.remove_subtask(index)?;
        self.repository
            .update_fields(&id, codec::encode_sub_tasks(task.sub_tasks()))
            .await
    }
}
