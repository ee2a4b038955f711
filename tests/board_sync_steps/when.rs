//! When steps for board synchronisation BDD scenarios.

use super::world::{BoardWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskboard::task::{
    domain::TaskType,
    ports::{DocumentId, DocumentStore},
};

#[when(r#"the task "{title}" is moved to "{column}""#)]
fn task_is_moved(world: &mut BoardWorld, title: String, column: String) -> Result<(), eyre::Report> {
    let target = TaskType::try_from(column.as_str())?;
    let id = world.id_of(&title)?;
    let result = run_async(world.harness.board.move_by_id(&id, target));
    if result.is_ok() {
        run_async(world.harness.wait_until(|tasks| {
            tasks
                .iter()
                .any(|task| task.id() == Some(&id) && task.task_type() == target)
        }))
        .wrap_err("wait for moved task")?;
    }
    world.last_move_result = Some(result);
    Ok(())
}

#[when(r#"subtask {index:usize} of "{title}" is deleted"#)]
fn subtask_is_deleted(world: &mut BoardWorld, index: usize, title: String) -> Result<(), eyre::Report> {
    let mut task = world.cached(&title)?;
    let remaining = task.sub_tasks().len().saturating_sub(1);
    run_async(world.harness.subtasks.delete_subtask(&mut task, index))
        .wrap_err("delete subtask")?;
    let id = world.id_of(&title)?;
    run_async(world.harness.wait_until(|tasks| {
        tasks
            .iter()
            .any(|cached| cached.id() == Some(&id) && cached.sub_tasks().len() == remaining)
    }))
    .wrap_err("wait for subtask deletion")?;
    Ok(())
}

#[when(r#"another client deletes the task "{title}""#)]
fn another_client_deletes(world: &mut BoardWorld, title: String) -> Result<(), eyre::Report> {
    let id = world.id_of(&title)?;
    run_async(
        world
            .harness
            .store
            .delete("tasks", &DocumentId::from(&id)),
    )
    .wrap_err("delete task directly in the store")?;
    run_async(
        world
            .harness
            .wait_until(|tasks| tasks.iter().all(|task| task.id() != Some(&id))),
    )
    .wrap_err("wait for remote deletion")?;
    Ok(())
}
