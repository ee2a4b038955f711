//! Live query behaviour across clients and failure modes.

use std::sync::Arc;

use crate::test_helpers::{BoardHarness, due_date};
use rstest::{fixture, rstest};
use taskboard::task::{
    adapters::memory::InMemoryDocumentStore,
    domain::{Priority, Task},
    ports::DocumentStoreError,
    services::TaskSyncError,
};

#[fixture]
fn harness() -> BoardHarness {
    BoardHarness::new()
}

fn task(title: &str, priority: Option<Priority>) -> Task {
    let task = Task::new(title, due_date());
    match priority {
        Some(priority) => task.with_priority(priority),
        None => task,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cache_follows_stored_priority_string_order(
    harness: BoardHarness,
) -> Result<(), eyre::Report> {
    for (title, priority) in [
        ("urgent", Some(Priority::Urgent)),
        ("none", None),
        ("medium", Some(Priority::Medium)),
        ("low", Some(Priority::Low)),
    ] {
        harness.repository.add(&task(title, priority)).await?;
    }

    harness.engine.subscribe().await?;
    let tasks = harness.wait_until(|tasks| tasks.len() == 4).await?;

    let titles: Vec<_> = tasks.iter().map(Task::title).collect();
    eyre::ensure!(
        titles == ["none", "low", "medium", "urgent"],
        "unexpected order {titles:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn second_client_sees_first_clients_writes() -> Result<(), eyre::Report> {
    let store = Arc::new(InMemoryDocumentStore::new());
    let first = BoardHarness::over_store(Arc::clone(&store));
    let second = BoardHarness::over_store(store);
    first.engine.subscribe().await?;
    second.engine.subscribe().await?;

    let id = first.repository.add(&task("shared", Some(Priority::Low))).await?;
    let seen = second
        .wait_until(|tasks| tasks.iter().any(|cached| cached.id() == Some(&id)))
        .await?;

    eyre::ensure!(seen.len() == 1, "second client should hold one task");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn degraded_load_keeps_the_board_usable(harness: BoardHarness) -> Result<(), eyre::Report> {
    harness.repository.add(&task("cached", Some(Priority::Low))).await?;
    harness.engine.load_once().await?;
    harness
        .store
        .fail_reads(DocumentStoreError::Unavailable("offline".to_owned()))?;

    let reload = harness.engine.load_once().await;
    let subscribe = harness.engine.subscribe().await;

    eyre::ensure!(matches!(reload, Err(TaskSyncError::RemoteRead(_))), "reload should fail");
    eyre::ensure!(
        matches!(subscribe, Err(TaskSyncError::RemoteRead(_))),
        "subscribe should fail"
    );
    eyre::ensure!(harness.repository.count_all() == 1, "cache should be kept");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn resubscribing_after_unsubscribe_resumes_updates(
    harness: BoardHarness,
) -> Result<(), eyre::Report> {
    harness.engine.subscribe().await?;
    harness.engine.unsubscribe();
    harness.repository.add(&task("while closed", None)).await?;

    harness.engine.subscribe().await?;
    harness.wait_until(|tasks| tasks.len() == 1).await?;

    eyre::ensure!(harness.engine.is_subscribed(), "query should be open again");
    Ok(())
}
