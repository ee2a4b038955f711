//! Resolution of weak assignee references against the contacts directory.

use super::{TaskCacheReader, TaskSyncError, TaskSyncResult};
use crate::config::BoardConfig;
use crate::contact::{domain::ContactSnapshot, ports::ContactDirectory};
use crate::task::domain::{AssigneeRef, Task, TaskId};
use std::sync::Arc;

/// Assignee resolver service.
///
/// Every call reads a fresh directory snapshot, so results follow contact
/// deletions and task edits without any invalidation step.
pub struct AssigneeResolver<D>
where
    D: ContactDirectory,
{
    directory: Arc<D>,
    cache: TaskCacheReader,
    display_limit: usize,
}

impl<D> AssigneeResolver<D>
where
    D: ContactDirectory,
{
    /// Creates a resolver using the configured display limit.
    #[must_use]
    pub const fn new(directory: Arc<D>, cache: TaskCacheReader, config: &BoardConfig) -> Self {
        Self {
            directory,
            cache,
            display_limit: config.board.assignee_display_limit,
        }
    }

    /// Returns the number of assignees shown before the overflow badge.
    #[must_use]
    pub const fn display_limit(&self) -> usize {
        self.display_limit
    }

    /// Returns up to the display limit of assignees whose contact still
    /// exists, in stored order.
    #[must_use]
    pub fn existing_assignees(&self, task: &Task) -> Vec<AssigneeRef> {
        let contacts = self.directory.snapshot();
        valid_assignees(task, &contacts)
            .take(self.display_limit)
            .cloned()
            .collect()
    }

    /// Returns how many valid assignees exceed the display limit.
    #[must_use]
    pub fn overflow_count(&self, task: &Task) -> usize {
        let contacts = self.directory.snapshot();
        valid_assignees(task, &contacts)
            .count()
            .saturating_sub(self.display_limit)
    }

    /// Resolves the assignees of the cached task with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`TaskSyncError::NotFoundLocal`] when the task is no longer
    /// cached.
    pub fn existing_assignees_for(&self, id: &TaskId) -> TaskSyncResult<Vec<AssigneeRef>> {
        let tasks = self.cache.current();
        let task = tasks
            .iter()
            .find(|task| task.id() == Some(id))
            .ok_or_else(|| TaskSyncError::NotFoundLocal(id.clone()))?;
        Ok(self.existing_assignees(task))
    }
}

fn valid_assignees<'a>(
    task: &'a Task,
    contacts: &'a ContactSnapshot,
) -> impl Iterator<Item = &'a AssigneeRef> {
    task.assigned_to()
        .iter()
        .filter(|assignee| {
            assignee
                .contact_id()
                .is_some_and(|contact_id| contacts.contains(contact_id))
        })
}
