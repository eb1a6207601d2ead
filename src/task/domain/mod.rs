//! Domain model for the task list.
//!
//! Tasks, their identifiers, the view filter, and the pure view projection
//! live here with no infrastructure dependencies.

mod error;
mod filter;
mod ids;
mod submission;
mod task;
mod view;

pub use error::{ParseTaskFilterError, ParseTaskIdError};
pub use filter::TaskFilter;
pub use ids::TaskId;
pub use submission::{MAX_TASK_TEXT_CHARS, prepare_submission};
pub use task::{PersistedTaskData, Task, TaskStatus};
pub use view::{TaskView, items_left_label, project};
