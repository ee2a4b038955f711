//! Runs the task board against an in-memory store seeded with demo data.
//!
//! Usage:
//!
//! ```text
//! taskboard-demo [--config <path>] [--log-level <filter>]
//! ```
//!
//! The demo seeds a few tasks and contacts, opens the live query, logs the
//! board summary, moves one task and toggles one of its subtasks, then logs
//! the summary again once the store has pushed the change back.
//! `RUST_LOG` takes precedence over `--log-level`, which in turn overrides the
//! `[logging]` section of the configuration file.

#[path = "taskboard_demo/seed.rs"]
mod seed;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use mockable::{Clock, DefaultClock};
use taskboard::config::BoardConfig;
use taskboard::contact::adapters::memory::InMemoryContactDirectory;
use taskboard::task::{
    adapters::memory::InMemoryDocumentStore,
    domain::{Priority, Task, TaskType},
    services::{
        AssigneeResolver, BoardService, SubtaskManager, SummaryService, SyncEngine,
        TaskCacheReader, TaskList, TaskRepository,
    },
};
use thiserror::Error;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

const SNAPSHOT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Parser)]
#[command(name = "taskboard-demo", about = "Drive the task board against demo data")]
struct Args {
    /// Configuration file; defaults to the per-user config directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter, for example `debug` or `taskboard=trace`.
    #[arg(long, env = "TASKBOARD_LOG")]
    log_level: Option<String>,
}

#[derive(Debug, Error)]
enum DemoError {
    #[error("timed out waiting for a task snapshot")]
    SnapshotTimeout,
    #[error("task cache closed before the expected snapshot arrived")]
    CacheClosed,
    #[error("seeded board has no task in the to-do column")]
    NothingToMove,
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let args = Args::parse();
    let config = BoardConfig::load(args.config.as_deref())?;
    init_tracing(args.log_level.as_deref().unwrap_or(&config.logging.level));

    let clock = Arc::new(DefaultClock);
    let store = Arc::new(InMemoryDocumentStore::new());
    let directory = Arc::new(InMemoryContactDirectory::with_contacts(seed::contacts()));
    let engine = SyncEngine::new(Arc::clone(&store), Arc::clone(&clock), &config);
    let repository = TaskRepository::new(Arc::clone(&store), engine.cache(), &config);

    let seeded = seed::tasks(clock.utc());
    for task in &seeded {
        repository.add(task).await?;
    }
    tracing::info!(count = seeded.len(), "seeded demo tasks");

    engine.subscribe().await?;
    tracing::info!(
        collection = %engine.query().collection(),
        order_by = ?engine.query().order_by(),
        "listening for task snapshots"
    );
    let mut reader = engine.cache();
    wait_for(&mut reader, |tasks| tasks.len() == seeded.len()).await?;

    let summary = SummaryService::new(engine.cache(), Arc::clone(&clock));
    let resolver = AssigneeResolver::new(directory, engine.cache(), &config);
    log_board(&repository, &resolver);
    tracing::info!(summary = ?summary.summary(), "board summary");

    let mut task = repository
        .tasks_in_column(TaskType::ToDo)
        .into_iter()
        .next()
        .ok_or(DemoError::NothingToMove)?;
    let moved_id = task.require_id()?.clone();
    BoardService::new(repository.clone())
        .move_task(&mut task, TaskType::InProgress)
        .await?;
    wait_for(&mut reader, |tasks| {
        tasks.iter().any(|cached| {
            cached.id() == Some(&moved_id) && cached.task_type() == TaskType::InProgress
        })
    })
    .await?;

    let mut task = repository.require(&moved_id)?;
    let is_checked = SubtaskManager::new(repository.clone())
        .toggle_at(&mut task, 0)
        .await?;
    tracing::info!(task_id = %moved_id, is_checked, "toggled first subtask");
    wait_for(&mut reader, |tasks| {
        tasks.iter().any(|cached| {
            cached.id() == Some(&moved_id)
                && cached
                    .sub_tasks()
                    .first()
                    .is_some_and(|sub_task| sub_task.is_checked() == is_checked)
        })
    })
    .await?;

    tracing::info!(summary = ?summary.summary(), "board summary after edits");
    engine.unsubscribe();
    Ok(())
}

fn init_tracing(default_filter: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

async fn wait_for<F>(reader: &mut TaskCacheReader, predicate: F) -> Result<TaskList, DemoError>
where
    F: FnMut(&[Task]) -> bool,
{
    tokio::time::timeout(SNAPSHOT_TIMEOUT, reader.wait_until(predicate))
        .await
        .map_err(|_| DemoError::SnapshotTimeout)?
        .ok_or(DemoError::CacheClosed)
}

fn log_board(
    repository: &TaskRepository<InMemoryDocumentStore>,
    resolver: &AssigneeResolver<InMemoryContactDirectory>,
) {
    for column in TaskType::ALL {
        for task in repository.tasks_in_column(column) {
            let progress = task.subtask_progress();
            tracing::info!(
                column = column.title(),
                title = task.title(),
                priority = task.priority().map_or("none", Priority::as_str),
                subtasks_done = progress.done,
                subtasks_total = progress.total,
                assignees = resolver.existing_assignees(&task).len(),
                overflow = resolver.overflow_count(&task),
                "task card"
            );
        }
    }
}
