//! End-to-end board operations against the in-memory store.

use crate::test_helpers::{BoardHarness, assignee, contact, due_date};
use rstest::{fixture, rstest};
use serde_json::json;
use taskboard::contact::domain::ContactId;
use taskboard::task::{
    domain::{Priority, SubTask, Task, TaskId, TaskType},
    ports::{DocumentFields, DocumentId, DocumentStore},
    services::TaskSyncError,
};

#[fixture]
fn harness() -> BoardHarness {
    BoardHarness::new()
}

fn login_task() -> Task {
    Task::new("Login form", due_date())
        .with_description("Validate credentials")
        .with_category("Technical Task")
        .with_priority(Priority::Urgent)
        .with_sub_tasks([
            SubTask::new("HTML"),
            SubTask::new("Validation"),
            SubTask::new("Routing"),
        ])
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn added_task_arrives_through_the_live_query(
    harness: BoardHarness,
) -> Result<(), eyre::Report> {
    harness.engine.subscribe().await?;

    let id = harness.add_and_wait(&login_task()).await?;

    let cached = harness.repository.require(&id)?;
    eyre::ensure!(cached.title() == "Login form", "title mismatch");
    eyre::ensure!(cached.task_type() == TaskType::ToDo, "new tasks start in to-do");
    eyre::ensure!(cached.sub_tasks().len() == 3, "subtasks lost");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn moved_task_changes_column_after_next_snapshot(
    harness: BoardHarness,
) -> Result<(), eyre::Report> {
    harness.engine.subscribe().await?;
    let id = harness.add_and_wait(&login_task()).await?;

    harness.board.move_by_id(&id, TaskType::Feedback).await?;
    harness
        .wait_until(|tasks| tasks.iter().any(|task| task.task_type() == TaskType::Feedback))
        .await?;

    eyre::ensure!(harness.repository.count_by_type(TaskType::ToDo) == 0, "stale column");
    eyre::ensure!(harness.repository.count_by_type(TaskType::Feedback) == 1, "move lost");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn subtask_toggle_and_delete_round_trip(harness: BoardHarness) -> Result<(), eyre::Report> {
    harness.engine.subscribe().await?;
    let id = harness.add_and_wait(&login_task()).await?;

    let mut task = harness.repository.require(&id)?;
    harness.subtasks.toggle_at(&mut task, 2).await?;
    harness.subtasks.delete_subtask(&mut task, 0).await?;
    let tasks = harness
        .wait_until(|tasks| tasks.iter().any(|task| task.sub_tasks().len() == 2))
        .await?;

    let cached = tasks.first().ok_or_else(|| eyre::eyre!("task missing"))?;
    let texts: Vec<_> = cached.sub_tasks().iter().map(SubTask::text).collect();
    eyre::ensure!(texts == ["Validation", "Routing"], "unexpected subtasks {texts:?}");
    eyre::ensure!(
        cached.subtask_progress().done == 1,
        "toggle should survive the partial subtask write"
    );
    eyre::ensure!(cached.title() == "Login form", "partial write clobbered title");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_task_leaves_cache_and_cannot_be_moved(
    harness: BoardHarness,
) -> Result<(), eyre::Report> {
    harness.engine.subscribe().await?;
    let id = harness.add_and_wait(&login_task()).await?;

    harness.repository.delete(&id).await?;
    harness.wait_until(<[Task]>::is_empty).await?;
    let result = harness.board.move_by_id(&id, TaskType::Done).await;

    eyre::ensure!(harness.repository.find_index_by_id(&id).is_none(), "task still cached");
    eyre::ensure!(
        matches!(result, Err(TaskSyncError::NotFoundLocal(_))),
        "expected NotFoundLocal, got {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn malformed_records_are_shown_with_defaults(
    harness: BoardHarness,
) -> Result<(), eyre::Report> {
    let mut fields = DocumentFields::new();
    fields.insert("title".to_owned(), json!("Imported"));
    fields.insert("priority".to_owned(), json!("critical"));
    fields.insert("taskType".to_owned(), json!("archived"));
    fields.insert("subTasks".to_owned(), json!("not a list"));
    let raw_id = DocumentId::new("legacy").ok_or_else(|| eyre::eyre!("blank id"))?;
    harness.store.put_raw("tasks", raw_id, fields)?;

    harness.engine.subscribe().await?;
    let tasks = harness.wait_until(|tasks| tasks.len() == 1).await?;

    let task = tasks.first().ok_or_else(|| eyre::eyre!("task missing"))?;
    eyre::ensure!(task.title() == "Imported", "title mismatch");
    eyre::ensure!(task.priority().is_none(), "unknown priority should be dropped");
    eyre::ensure!(task.task_type() == TaskType::ToDo, "unknown column should default");
    eyre::ensure!(task.sub_tasks().is_empty(), "malformed subtasks should be empty");
    eyre::ensure!(task.description().is_empty(), "missing description should be empty");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assignees_follow_contact_deletions(harness: BoardHarness) -> Result<(), eyre::Report> {
    harness.directory.upsert(contact("c1")?);
    harness.engine.subscribe().await?;
    let task = login_task().with_assignees([assignee("c1")?, assignee("c2")?]);
    let id = harness.add_and_wait(&task).await?;

    let resolved = harness.assignees.existing_assignees_for(&id)?;
    eyre::ensure!(resolved.len() == 1, "dangling c2 should be hidden");
    eyre::ensure!(resolved.first() == Some(&assignee("c1")?), "c1 should remain");

    harness.directory.remove(&ContactId::new("c1")?);
    eyre::ensure!(
        harness.assignees.existing_assignees_for(&id)?.is_empty(),
        "deleted contact should disappear"
    );
    let stored = harness
        .store
        .get_one("tasks", &DocumentId::from(&id))
        .await?
        .ok_or_else(|| eyre::eyre!("document missing"))?;
    eyre::ensure!(
        stored.fields().get("assignedTo").and_then(|value| value.as_array()).map(Vec::len)
            == Some(2),
        "stored references must not be rewritten"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn column_move_keeps_unreadable_stored_entries(
    harness: BoardHarness,
) -> Result<(), eyre::Report> {
    let mut fields = DocumentFields::new();
    fields.insert("title".to_owned(), json!("Legacy"));
    fields.insert(
        "subTasks".to_owned(),
        json!([{ "text": "a", "isChecked": false }, "legacy string subtask"]),
    );
    fields.insert(
        "assignedTo".to_owned(),
        json!([{ "contactId": "c1" }, { "contactId": 7 }, { "contactId": "" }]),
    );
    let raw_id = DocumentId::new("t1").ok_or_else(|| eyre::eyre!("blank id"))?;
    harness.store.put_raw("tasks", raw_id.clone(), fields)?;
    harness.engine.load_once().await?;

    let moved = harness
        .board
        .move_by_id(&TaskId::from(raw_id.clone()), TaskType::Done)
        .await?;

    let stored = harness
        .store
        .get_one("tasks", &raw_id)
        .await?
        .ok_or_else(|| eyre::eyre!("document missing"))?;
    eyre::ensure!(moved.task_type() == TaskType::Done, "move lost");
    eyre::ensure!(
        stored.fields().get("assignedTo")
            == Some(&json!([{ "contactId": "c1" }, { "contactId": 7 }, { "contactId": "" }])),
        "assignee entries were rewritten: {:?}",
        stored.fields().get("assignedTo")
    );
    eyre::ensure!(
        stored.fields().get("subTasks")
            == Some(&json!([
                { "text": "a", "isChecked": false },
                { "text": "legacy string subtask", "isChecked": false }
            ])),
        "subtask entries were dropped: {:?}",
        stored.fields().get("subTasks")
    );
    Ok(())
}
