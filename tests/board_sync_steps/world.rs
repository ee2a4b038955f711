//! Shared world state for board synchronisation BDD scenarios.

use std::collections::HashMap;

use crate::test_helpers::BoardHarness;
use rstest::fixture;
use taskboard::task::{
    domain::{Task, TaskId},
    services::TaskSyncError,
};

/// Scenario world for board synchronisation behaviour tests.
pub struct BoardWorld {
    pub harness: BoardHarness,
    pub ids_by_title: HashMap<String, TaskId>,
    pub last_move_result: Option<Result<Task, TaskSyncError>>,
}

impl BoardWorld {
    /// Creates a world over an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            harness: BoardHarness::new(),
            ids_by_title: HashMap::new(),
            last_move_result: None,
        }
    }

    /// Returns the id of the task created with `title`.
    ///
    /// # Errors
    ///
    /// Returns an error when no task with that title was created.
    pub fn id_of(&self, title: &str) -> Result<TaskId, eyre::Report> {
        self.ids_by_title
            .get(title)
            .cloned()
            .ok_or_else(|| eyre::eyre!("no task titled {title} in scenario world"))
    }

    /// Returns the cached copy of the task created with `title`.
    ///
    /// # Errors
    ///
    /// Returns an error when the task is unknown or no longer cached.
    pub fn cached(&self, title: &str) -> Result<Task, eyre::Report> {
        Ok(self.harness.repository.require(&self.id_of(title)?)?)
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
