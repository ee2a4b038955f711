//! Unit tests for the task board.


use crate::contact::domain::ContactId;
use crate::task::{
    domain::{AssigneeRef, PersistedTaskData, Priority, SubTask, Task, TaskId, TaskType},
    services::{TaskCacheReader, TaskList},
};
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use std::time::Duration;

/// Clock frozen at a chosen instant.
#[derive(Debug, Clone, Copy)]
struct FixedClock(DateTime<Utc>);

impl FixedClock {
    fn at(year: i32, month: u32, day: u32, hour: u32) -> Self {
        Self(
            Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
                .single()
                .expect("valid fixed timestamp"),
        )
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

fn task_id(value: &str) -> TaskId {
    TaskId::new(value).expect("valid task id")
}

fn assignee(value: &str) -> AssigneeRef {
    AssigneeRef::new(ContactId::new(value).expect("valid contact id"))
}

/// Builds a persisted task with the given id, column and priority.
fn persisted_task(id: &str, task_type: TaskType, priority: Option<Priority>) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: task_id(id),
        title: format!("Task {id}"),
        description: String::new(),
        category: "Technical Task".to_owned(),
        due_date: FixedClock::at(2026, 3, 14, 9).utc(),
        priority,
        task_type,
        sub_tasks: vec![
            SubTask::new("first"),
            SubTask::new("second").checked(true),
            SubTask::new("third"),
        ],
        assigned_to: vec![assignee("c1")],
    })
}

/// Waits until the cache holds exactly `len` tasks.
async fn wait_for_len(reader: &mut TaskCacheReader, len: usize) -> TaskList {
    tokio::time::timeout(
        Duration::from_secs(2),
        reader.wait_until(|tasks| tasks.len() == len),
    )
    .await
    .expect("cache should update in time")
    .expect("cache owner should still be alive")
}
