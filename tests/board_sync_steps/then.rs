//! Then steps for board synchronisation BDD scenarios.

use super::world::BoardWorld;
use rstest_bdd_macros::then;
use taskboard::task::{
    domain::{SubTask, TaskType},
    services::TaskSyncError,
};

#[then(r#"the board shows "{title}" in column "{column}""#)]
fn board_shows_task_in_column(
    world: &BoardWorld,
    title: String,
    column: String,
) -> Result<(), eyre::Report> {
    let expected = TaskType::try_from(column.as_str())?;
    let task = world.cached(&title)?;

    if task.task_type() != expected {
        return Err(eyre::eyre!(
            "expected column {}, found {}",
            expected.as_str(),
            task.task_type().as_str()
        ));
    }

    Ok(())
}

#[then(r#"column "{column}" holds {count:usize} tasks"#)]
fn column_holds(world: &BoardWorld, column: String, count: usize) -> Result<(), eyre::Report> {
    let task_type = TaskType::try_from(column.as_str())?;
    let actual = world.harness.repository.count_by_type(task_type);
    eyre::ensure!(actual == count, "expected {count} tasks in {column}, found {actual}");
    Ok(())
}

#[then(r#"the task "{title}" has subtasks "{texts}""#)]
fn task_has_subtasks(world: &BoardWorld, title: String, texts: String) -> Result<(), eyre::Report> {
    let task = world.cached(&title)?;
    let actual: Vec<_> = task.sub_tasks().iter().map(SubTask::text).collect();
    let expected: Vec<_> = texts.split(',').map(str::trim).collect();
    eyre::ensure!(actual == expected, "expected subtasks {expected:?}, found {actual:?}");
    Ok(())
}

#[then(r#"the task "{title}" shows {shown:usize} assignees with {overflow:usize} more"#)]
fn task_shows_assignees(
    world: &BoardWorld,
    title: String,
    shown: usize,
    overflow: usize,
) -> Result<(), eyre::Report> {
    let task = world.cached(&title)?;
    let resolver = &world.harness.assignees;
    let actual_shown = resolver.existing_assignees(&task).len();
    let actual_overflow = resolver.overflow_count(&task);
    eyre::ensure!(
        actual_shown == shown && actual_overflow == overflow,
        "expected {shown} shown and {overflow} overflow, found {actual_shown} and {actual_overflow}"
    );
    Ok(())
}

#[then("the move fails because the task is no longer cached")]
fn move_fails_not_cached(world: &BoardWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_move_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing move result"))?;

    if !matches!(result, Err(TaskSyncError::NotFoundLocal(_))) {
        return Err(eyre::eyre!("expected NotFoundLocal error, got {result:?}"));
    }

    Ok(())
}
