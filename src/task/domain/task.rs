//! Task record and its derived completion status.

use super::TaskId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Completion status derived from a task's `completed` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task has not been completed yet.
    Active,
    /// Task has been marked as completed.
    Done,
}

/// A single to-do record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    text: String,
    completed: bool,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted display text.
    pub text: String,
    /// Persisted completion flag.
    pub completed: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new active task stamped with the clock's current time.
    ///
    /// The text is stored as given. Blank or overlong input is a
    /// presentation concern; see [`super::prepare_submission`].
    #[must_use]
    pub fn new(text: impl Into<String>, clock: &impl Clock) -> Self {
        Self {
            id: TaskId::new(),
            text: text.into(),
            completed: false,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            text: data.text,
            completed: data.completed,
            created_at: data.created_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the display text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns whether the task has been completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns the derived completion status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        if self.completed {
            TaskStatus::Done
        } else {
            TaskStatus::Active
        }
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Flips the completion flag.
    ///
    /// Calling this twice restores the original value.
    pub const fn toggle(&mut self) {
        self.completed = !self.completed;
    }

    /// Replaces the display text.
    ///
    /// Empty text is accepted.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}
