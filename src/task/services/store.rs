//! Service layer for the task store commands and query.

use crate::task::{
    domain::{ParseTaskIdError, Task, TaskFilter, TaskId, items_left_label, project},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Service-level errors for task store operations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// No task has the given identifier.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The backing store could not be reached or rejected the write.
    #[error("task store unavailable: {0}")]
    StoreUnavailable(Arc<dyn std::error::Error + Send + Sync>),

    /// A raw identifier could not be parsed.
    #[error(transparent)]
    MalformedId(#[from] ParseTaskIdError),
}

impl From<TaskRepositoryError> for TaskStoreError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::NotFound(id),
            TaskRepositoryError::DuplicateTask(id) => {
                warn!(task_id = %id, "store rejected a generated task id");
                Self::StoreUnavailable(Arc::new(TaskRepositoryError::DuplicateTask(id)))
            }
            TaskRepositoryError::Unavailable(source) => {
                warn!(error = %source, "task store unavailable");
                Self::StoreUnavailable(source)
            }
        }
    }
}

/// Result type for task store service operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Filtered snapshot of the task set, owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSnapshotView {
    /// Filter the view was computed with.
    pub filter: TaskFilter,
    /// Visible tasks, newest first.
    pub visible: Vec<Task>,
    /// Incomplete tasks across the whole set.
    pub active_count: usize,
}

impl TaskSnapshotView {
    /// Renders the footer counter, for example `"2 items left"`.
    #[must_use]
    pub fn items_left_label(&self) -> String {
        items_left_label(self.active_count)
    }
}

/// Task store orchestration service.
///
/// Owns no state of its own: the repository is the canonical task set and
/// the clock stamps creation times.
#[derive(Clone)]
pub struct TaskStoreService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskStoreService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task store service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Returns every task, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::StoreUnavailable`] when the repository
    /// cannot be read.
    pub async fn list(&self) -> TaskStoreResult<Vec<Task>> {
        let tasks = self.repository.list().await?;
        debug!(count = tasks.len(), "listed tasks");
        Ok(tasks)
    }

    /// Creates an active task with the given text and returns its id.
    ///
    /// Any text is accepted, including the empty string.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::StoreUnavailable`] when the task cannot be
    /// persisted, including the case where the store already holds the
    /// generated id.
    pub async fn create(&self, text: impl Into<String>) -> TaskStoreResult<TaskId> {
        let task = Task::new(text, &*self.clock);
        self.repository.store(&task).await?;
        info!(task_id = %task.id(), "created task");
        Ok(task.id())
    }

    /// Flips the completion flag of a task and returns the updated task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when no task has the id.
    pub async fn toggle(&self, id: TaskId) -> TaskStoreResult<Task> {
        let task = self.repository.toggle_completed(id).await?;
        info!(
            task_id = %id,
            completed = task.is_completed(),
            "toggled task"
        );
        Ok(task)
    }

    /// Replaces the text of a task and returns the updated task.
    ///
    /// Empty text is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when no task has the id.
    pub async fn edit(&self, id: TaskId, text: &str) -> TaskStoreResult<Task> {
        let task = self.repository.update_text(id, text).await?;
        info!(task_id = %id, "edited task");
        Ok(task)
    }

    /// Removes a task. Removing a missing task succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::StoreUnavailable`] when the repository
    /// cannot be written.
    pub async fn delete(&self, id: TaskId) -> TaskStoreResult<()> {
        let removed = self.repository.delete(id).await?;
        info!(task_id = %id, removed, "deleted task");
        Ok(())
    }

    /// Removes every completed task and returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::StoreUnavailable`] when the repository
    /// cannot be written. Some completed tasks may already be gone when an
    /// adapter fails part way through.
    pub async fn clear_completed(&self) -> TaskStoreResult<usize> {
        let removed = self.repository.delete_completed().await?;
        info!(removed, "cleared completed tasks");
        Ok(removed)
    }

    /// Lists the tasks and projects them through `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::StoreUnavailable`] when the repository
    /// cannot be read.
    pub async fn view(&self, filter: TaskFilter) -> TaskStoreResult<TaskSnapshotView> {
        let tasks = self.list().await?;
        let projected = project(&tasks, filter);
        debug!(
            %filter,
            visible = projected.visible().len(),
            active = projected.active_count(),
            "projected task view"
        );
        Ok(TaskSnapshotView {
            filter,
            visible: projected.to_owned_tasks(),
            active_count: projected.active_count(),
        })
    }

    /// Parses `raw_id` and toggles the task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::MalformedId`] when `raw_id` is not a task
    /// identifier, otherwise as [`Self::toggle`].
    pub async fn toggle_str(&self, raw_id: &str) -> TaskStoreResult<Task> {
        let id = raw_id.parse::<TaskId>()?;
        self.toggle(id).await
    }

    /// Parses `raw_id` and edits the task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::MalformedId`] when `raw_id` is not a task
    /// identifier, otherwise as [`Self::edit`].
    pub async fn edit_str(&self, raw_id: &str, text: &str) -> TaskStoreResult<Task> {
        let id = raw_id.parse::<TaskId>()?;
        self.edit(id, text).await
    }

    /// Parses `raw_id` and deletes the task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::MalformedId`] when `raw_id` is not a task
    /// identifier, otherwise as [`Self::delete`].
    pub async fn delete_str(&self, raw_id: &str) -> TaskStoreResult<()> {
        let id = raw_id.parse::<TaskId>()?;
        self.delete(id).await
    }
}
