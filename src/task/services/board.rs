//! Moving tasks between board columns.

use super::{TaskRepository, TaskSyncResult};
use crate::task::{
    domain::{Task, TaskId, TaskType},
    ports::DocumentStore,
};

/// Board service.
pub struct BoardService<S>
where
    S: DocumentStore,
{
    repository: TaskRepository<S>,
}

impl<S> BoardService<S>
where
    S: DocumentStore,
{
    /// Creates a board service writing through `repository`.
    #[must_use]
    pub const fn new(repository: TaskRepository<S>) -> Self {
        Self { repository }
    }

    /// Moves a persisted task into `target` and writes the full task.
    /// Returns the previous column.
    ///
    /// Moving into the current column still issues the write.
    ///
    /// # Errors
    ///
    /// Returns a domain error when the task has no id, or
    /// [`super::TaskSyncError::RemoteWrite`] when the store rejects the
    /// write.
    pub async fn move_task(&self, task: &mut Task, target: TaskType) -> TaskSyncResult<TaskType> {
        let previous = task.move_to(target)?;
        self.repository.update(task).await?;
        tracing::debug!(
            task_id = ?task.id(),
            from = previous.as_str(),
            to = target.as_str(),
            "task moved"
        );
        Ok(previous)
    }

    /// Moves the cached task with the given id into `target` and returns the
    /// moved task.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskSyncError::NotFoundLocal`] when the task is no
    /// longer cached, or [`super::TaskSyncError::RemoteWrite`] when the store
    /// rejects the write.
    pub async fn move_by_id(&self, id: &TaskId, target: TaskType) -> TaskSyncResult<Task> {
        let mut task = self.repository.require(id)?;
        self.move_task(&mut task, target).await?;
        Ok(task)
    }
}
