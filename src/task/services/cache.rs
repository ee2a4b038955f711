//! Shared, wholesale-replaced task cache.

use crate::task::domain::Task;
use std::sync::Arc;
use tokio::sync::watch;

/// Complete task list as of one snapshot.
pub type TaskList = Arc<Vec<Task>>;

/// Write side of the cache, owned by the sync engine.
///
/// The list is only ever swapped as a whole, so a reader observes either the
/// previous complete list or the next one.
#[derive(Debug)]
pub struct TaskCache {
    sender: watch::Sender<TaskList>,
}

impl TaskCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = watch::channel(Arc::new(Vec::new()));
        Self { sender }
    }

    /// Replaces the whole list and returns the stored value.
    pub(crate) fn replace(&self, tasks: Vec<Task>) -> TaskList {
        let list = Arc::new(tasks);
        self.sender.send_replace(Arc::clone(&list));
        list
    }

    /// Returns a read-only handle.
    #[must_use]
    pub fn reader(&self) -> TaskCacheReader {
        TaskCacheReader {
            receiver: self.sender.subscribe(),
        }
    }
}

impl Default for TaskCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only handle to the task cache.
#[derive(Debug, Clone)]
pub struct TaskCacheReader {
    receiver: watch::Receiver<TaskList>,
}

impl TaskCacheReader {
    /// Returns the current complete list.
    #[must_use]
    pub fn current(&self) -> TaskList {
        Arc::clone(&self.receiver.borrow())
    }

    /// Waits for the next replacement. Returns `false` once the cache owner
    /// is gone.
    pub async fn changed(&mut self) -> bool {
        self.receiver.changed().await.is_ok()
    }

    /// Waits until the list satisfies `predicate`, checking the current list
    /// first. Returns `None` if the cache owner goes away before that.
    pub async fn wait_until<F>(&mut self, mut predicate: F) -> Option<TaskList>
    where
        F: FnMut(&[Task]) -> bool,
    {
        self.receiver
            .wait_for(|tasks| predicate(tasks))
            .await
            .ok()
            .map(|tasks| Arc::clone(&tasks))
    }
}
