//! Given steps for board synchronisation BDD scenarios.

use super::world::{BoardWorld, run_async};
use crate::test_helpers::{assignee, contact, due_date};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::task::domain::{AssigneeRef, Priority, SubTask, Task, TaskType};

#[given("a synced board")]
fn synced_board(world: &mut BoardWorld) -> Result<(), eyre::Report> {
    run_async(world.harness.engine.subscribe()).wrap_err("open live task query")?;
    Ok(())
}

#[given(r#"a contact "{id}""#)]
fn a_contact(world: &mut BoardWorld, id: String) -> Result<(), eyre::Report> {
    world.harness.directory.upsert(contact(&id)?);
    Ok(())
}

#[given(r#"a task "{title}" in column "{column}" with priority "{priority}""#)]
fn a_task(
    world: &mut BoardWorld,
    title: String,
    column: String,
    priority: String,
) -> Result<(), eyre::Report> {
    let task_type = TaskType::try_from(column.as_str())?;
    let priority = Priority::try_from(priority.as_str())?;
    let task = Task::new(title.as_str(), due_date())
        .with_task_type(task_type)
        .with_priority(priority);
    let id = run_async(world.harness.add_and_wait(&task)).wrap_err("add scenario task")?;
    world.ids_by_title.insert(title, id);
    Ok(())
}

#[given(r#"the task "{title}" has subtask "{text}""#)]
fn task_has_subtask(world: &mut BoardWorld, title: String, text: String) -> Result<(), eyre::Report> {
    let mut task = world.cached(&title)?;
    let expected = task.sub_tasks().len() + 1;
    task.sub_tasks_mut().push(SubTask::new(text));
    persist_and_wait(world, &task, |cached| cached.sub_tasks().len() == expected)
}

#[given(r#"the task "{title}" is assigned to "{contact_id}""#)]
fn task_is_assigned(
    world: &mut BoardWorld,
    title: String,
    contact_id: String,
) -> Result<(), eyre::Report> {
    let mut task = world.cached(&title)?;
    let mut assignees: Vec<AssigneeRef> = task.assigned_to().to_vec();
    assignees.push(assignee(&contact_id)?);
    let expected = assignees.len();
    task.set_assignees(assignees);
    persist_and_wait(world, &task, |cached| cached.assigned_to().len() == expected)
}

fn persist_and_wait(
    world: &BoardWorld,
    task: &Task,
    mut arrived: impl FnMut(&Task) -> bool,
) -> Result<(), eyre::Report> {
    let id = task.require_id()?.clone();
    run_async(world.harness.repository.update(task)).wrap_err("update scenario task")?;
    run_async(world.harness.wait_until(|tasks| {
        tasks
            .iter()
            .any(|cached| cached.id() == Some(&id) && arrived(cached))
    }))
    .wrap_err("wait for updated task")?;
    Ok(())
}
