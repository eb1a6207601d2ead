//! Shared world state for task store BDD scenarios.

use std::sync::Arc;

use checklist::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::TaskId,
    services::{TaskSnapshotView, TaskStoreError, TaskStoreService},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestTaskService = TaskStoreService<InMemoryTaskRepository, DefaultClock>;

/// Scenario world for task store behaviour tests.
pub struct TaskStoreWorld {
    pub service: TestTaskService,
    pub created_ids: Vec<TaskId>,
    pub last_command_result: Option<Result<(), TaskStoreError>>,
    pub last_view: Option<TaskSnapshotView>,
}

impl TaskStoreWorld {
    /// Creates a world backed by an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        let service = TaskStoreService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(DefaultClock),
        );

        Self {
            service,
            created_ids: Vec::new(),
            last_command_result: None,
            last_view: None,
        }
    }
}

impl Default for TaskStoreWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskStoreWorld {
    TaskStoreWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
