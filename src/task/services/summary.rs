//! Derived board statistics for the summary view.

use super::TaskCacheReader;
use crate::task::domain::{Priority, Task, TaskType};
use chrono::{DateTime, Local, Utc};
use mockable::Clock;
use std::sync::Arc;

/// Counts shown on the summary page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardSummary {
    /// All tasks on the board.
    pub total: usize,
    /// Tasks in the to-do column.
    pub to_do: usize,
    /// Tasks in progress.
    pub in_progress: usize,
    /// Tasks awaiting feedback.
    pub awaiting_feedback: usize,
    /// Finished tasks.
    pub done: usize,
    /// Urgent tasks.
    pub urgent: usize,
    /// Urgent tasks due today (local calendar day of the injected clock).
    pub urgent_due_today: usize,
    /// Earliest due date among urgent tasks.
    pub next_urgent_deadline: Option<DateTime<Utc>>,
}

/// Summary service.
///
/// Recomputes everything from the current cache on each call.
pub struct SummaryService<C>
where
    C: Clock + Send + Sync,
{
    cache: TaskCacheReader,
    clock: Arc<C>,
}

impl<C> SummaryService<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a summary service.
    #[must_use]
    pub const fn new(cache: TaskCacheReader, clock: Arc<C>) -> Self {
        Self { cache, clock }
    }

    /// Builds the summary for the current cache.
    #[must_use]
    pub fn summary(&self) -> BoardSummary {
        let tasks = self.cache.current();
        let today = self.clock.local().date_naive();
        let urgent = || tasks.iter().filter(|task| task.priority() == Some(Priority::Urgent));
        let in_column =
            |task_type: TaskType| tasks.iter().filter(|task| task.task_type() == task_type).count();

        BoardSummary {
            total: tasks.len(),
            to_do: in_column(TaskType::ToDo),
            in_progress: in_column(TaskType::InProgress),
            awaiting_feedback: in_column(TaskType::Feedback),
            done: in_column(TaskType::Done),
            urgent: urgent().count(),
            urgent_due_today: urgent()
                .filter(|task| task.due_date().with_timezone(&Local).date_naive() == today)
                .count(),
            next_urgent_deadline: urgent().map(Task::due_date).min(),
        }
    }
}
