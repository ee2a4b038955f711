//! CRUD surface over the task cache and the remote store.

use super::{TaskCacheReader, TaskList, TaskSyncError, TaskSyncResult};
use crate::config::BoardConfig;
use crate::task::{
    codec,
    domain::{Priority, Task, TaskId, TaskType},
    ports::{DocumentFields, DocumentId, DocumentStore},
};
use std::sync::Arc;

/// Task repository service.
///
/// Reads come from the cache maintained by the sync engine. Writes go
/// straight to the store; the cache reflects them only after a later
/// snapshot, so a caller must not expect to read its own write immediately.
pub struct TaskRepository<S>
where
    S: DocumentStore,
{
    store: Arc<S>,
    cache: TaskCacheReader,
    collection: String,
}

impl<S> Clone for TaskRepository<S>
where
    S: DocumentStore,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            cache: self.cache.clone(),
            collection: self.collection.clone(),
        }
    }
}

impl<S> TaskRepository<S>
where
    S: DocumentStore,
{
    /// Creates a repository writing to the configured task collection.
    #[must_use]
    pub fn new(store: Arc<S>, cache: TaskCacheReader, config: &BoardConfig) -> Self {
        Self {
            store,
            cache,
            collection: config.store.collection.clone(),
        }
    }

    /// Creates a task document and returns its store-assigned identifier.
    ///
    /// Any identifier already set on `task` is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TaskSyncError::RemoteWrite`] when the store rejects the
    /// write.
    pub async fn add(&self, task: &Task) -> TaskSyncResult<TaskId> {
        let id = self
            .store
            .create(&self.collection, codec::encode(task))
            .await
            .map_err(TaskSyncError::RemoteWrite)?;
        tracing::debug!(task_id = %id, "task created");
        Ok(TaskId::from(id))
    }

    /// Overwrites the stored body of a persisted task with its full encoded
    /// form.
    ///
    /// A task without an identifier is skipped silently.
    ///
    /// # Errors
    ///
    /// Returns [`TaskSyncError::RemoteWrite`] when the store rejects the
    /// write.
    pub async fn update(&self, task: &Task) -> TaskSyncResult<()> {
        let Some(id) = task.id() else {
            tracing::debug!(title = task.title(), "skipping update of unpersisted task");
            return Ok(());
        };
        self.update_fields(id, codec::encode(task)).await
    }

    /// Deletes a task document. Deleting an unknown id succeeds.
    ///
    /// The cached entry disappears with the next snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`TaskSyncError::RemoteWrite`] when the store rejects the
    /// write.
    pub async fn delete(&self, id: &TaskId) -> TaskSyncResult<()> {
        self.store
            .delete(&self.collection, &DocumentId::from(id))
            .await
            .map_err(TaskSyncError::RemoteWrite)?;
        tracing::debug!(task_id = %id, "task deleted");
        Ok(())
    }

    pub(crate) async fn update_fields(
        &self,
        id: &TaskId,
        fields: DocumentFields,
    ) -> TaskSyncResult<()> {
        self.store
            .update(&self.collection, &DocumentId::from(id), fields)
            .await
            .map_err(TaskSyncError::RemoteWrite)?;
        tracing::debug!(task_id = %id, "task updated");
        Ok(())
    }

    /// Returns the cached task list in live-query order.
    #[must_use]
    pub fn tasks(&self) -> TaskList {
        self.cache.current()
    }

    /// Returns the number of cached tasks.
    #[must_use]
    pub fn count_all(&self) -> usize {
        self.cache.current().len()
    }

    /// Returns the number of cached tasks in the given column.
    #[must_use]
    pub fn count_by_type(&self, task_type: TaskType) -> usize {
        self.cache
            .current()
            .iter()
            .filter(|task| task.task_type() == task_type)
            .count()
    }

    /// Returns the number of cached tasks with the given priority.
    #[must_use]
    pub fn count_by_priority(&self, priority: Priority) -> usize {
        self.cache
            .current()
            .iter()
            .filter(|task| task.priority() == Some(priority))
            .count()
    }

    /// Returns the position of the task in the cached list, `None` when it
    /// is absent (for example after a remote deletion).
    #[must_use]
    pub fn find_index_by_id(&self, id: &TaskId) -> Option<usize> {
        self.cache
            .current()
            .iter()
            .position(|task| task.id() == Some(id))
    }

    /// Returns a copy of the cached task.
    #[must_use]
    pub fn find_by_id(&self, id: &TaskId) -> Option<Task> {
        self.cache
            .current()
            .iter()
            .find(|task| task.id() == Some(id))
            .cloned()
    }

    /// Returns a copy of the cached task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskSyncError::NotFoundLocal`] when the task is not cached.
    pub fn require(&self, id: &TaskId) -> TaskSyncResult<Task> {
        self.find_by_id(id)
            .ok_or_else(|| TaskSyncError::NotFoundLocal(id.clone()))
    }

    /// Returns the cached tasks of one column in live-query order.
    #[must_use]
    pub fn tasks_in_column(&self, task_type: TaskType) -> Vec<Task> {
        self.cache
            .current()
            .iter()
            .filter(|task| task.task_type() == task_type)
            .cloned()
            .collect()
    }

    /// Returns cached tasks whose title or description contains `query`,
    /// ignoring case. A blank query matches everything.
    #[must_use]
    pub fn search_by_title(&self, query: &str) -> Vec<Task> {
        let needle = query.trim().to_lowercase();
        self.cache
            .current()
            .iter()
            .filter(|task| {
                needle.is_empty()
                    || task.title().to_lowercase().contains(&needle)
                    || task.description().to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }
}
