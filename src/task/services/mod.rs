//! Application services for the task board.
//!
//! The [`SyncEngine`] is the only writer of the shared [`TaskCache`]; every
//! other service reads the cache through a [`TaskCacheReader`] and writes to
//! the remote store.

mod assignees;
mod board;
mod cache;
mod error;
mod repository;
mod subtasks;
mod summary;
mod sync;

pub use assignees::AssigneeResolver;
pub use board::BoardService;
pub use cache::{TaskCache, TaskCacheReader, TaskList};
pub use error::{TaskSyncError, TaskSyncResult};
pub use repository::TaskRepository;
pub use subtasks::SubtaskManager;
pub use summary::{BoardSummary, SummaryService};
pub use sync::SyncEngine;
