//! In-memory task repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Clones share the same underlying task set.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, StoredTask>,
    next_sequence: u64,
}

/// A task paired with its insertion position, used to break timestamp ties.
#[derive(Debug, Clone)]
struct StoredTask {
    sequence: u64,
    task: Task,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read_state(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::unavailable(std::io::Error::other(err.to_string()))
        })
    }

    fn write_state(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::unavailable(std::io::Error::other(err.to_string()))
        })
    }
}

/// Applies `mutate` to the stored task and returns a copy of the result.
fn modify_task(
    state: &mut InMemoryTaskState,
    id: TaskId,
    mutate: impl FnOnce(&mut Task),
) -> TaskRepositoryResult<Task> {
    let stored = state
        .tasks
        .get_mut(&id)
        .ok_or(TaskRepositoryError::NotFound(id))?;
    mutate(&mut stored.task);
    Ok(stored.task.clone())
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write_state()?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }

        let sequence = state.next_sequence;
        state.next_sequence = sequence.saturating_add(1);
        state.tasks.insert(
            task.id(),
            StoredTask {
                sequence,
                task: task.clone(),
            },
        );
        Ok(())
    }

    async fn list(&self) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read_state()?;
        let mut stored: Vec<&StoredTask> = state.tasks.values().collect();
        stored.sort_by(|left, right| {
            right
                .task
                .created_at()
                .cmp(&left.task.created_at())
                .then_with(|| right.sequence.cmp(&left.sequence))
        });
        Ok(stored.into_iter().map(|entry| entry.task.clone()).collect())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read_state()?;
        Ok(state.tasks.get(&id).map(|entry| entry.task.clone()))
    }

    async fn toggle_completed(&self, id: TaskId) -> TaskRepositoryResult<Task> {
        let mut state = self.write_state()?;
        modify_task(&mut state, id, Task::toggle)
    }

    async fn update_text(&self, id: TaskId, text: &str) -> TaskRepositoryResult<Task> {
        let mut state = self.write_state()?;
        modify_task(&mut state, id, |task| task.set_text(text))
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        let mut state = self.write_state()?;
        Ok(state.tasks.remove(&id).is_some())
    }

    async fn delete_completed(&self) -> TaskRepositoryResult<usize> {
        let mut state = self.write_state()?;
        let before = state.tasks.len();
        state.tasks.retain(|_, entry| !entry.task.is_completed());
        Ok(before.saturating_sub(state.tasks.len()))
    }
}
