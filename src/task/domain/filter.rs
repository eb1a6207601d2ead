//! View selector applied by the projection.

use super::{ParseTaskFilterError, Task};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which tasks a view should show. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskFilter {
    /// Every task.
    #[default]
    All,
    /// Tasks that are not completed.
    Active,
    /// Tasks that are completed.
    Completed,
}

impl TaskFilter {
    /// Every filter, in the order a filter bar presents them.
    pub const ALL: [Self; 3] = [Self::All, Self::Active, Self::Completed];

    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    /// Returns whether `task` belongs in a view using this filter.
    #[must_use]
    pub const fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.is_completed(),
            Self::Completed => task.is_completed(),
        }
    }
}

impl TryFrom<&str> for TaskFilter {
    type Error = ParseTaskFilterError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseTaskFilterError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
