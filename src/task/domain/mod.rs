//! Domain model for the task board.
//!
//! Tasks, their subtasks and weak assignee references, plus the board column
//! lifecycle. Everything here is free of store and runtime concerns; the
//! untyped wire representation is handled by [`crate::task::codec`].

mod board;
mod error;
mod ids;
mod task;

pub use board::TaskType;
pub use error::{ParsePriorityError, ParseTaskTypeError, TaskDomainError};
pub use ids::TaskId;
pub use task::{AssigneeRef, PersistedTaskData, Priority, SubTask, SubtaskProgress, Task};
