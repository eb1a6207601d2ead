//! Pure projection from the full task set to what a list view renders.

use super::{Task, TaskFilter};

/// The visible subset of a task snapshot plus the global active count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView<'a> {
    filter: TaskFilter,
    visible: Vec<&'a Task>,
    active_count: usize,
}

impl<'a> TaskView<'a> {
    /// Returns the filter this view was projected with.
    #[must_use]
    pub const fn filter(&self) -> TaskFilter {
        self.filter
    }

    /// Returns the visible tasks in snapshot order.
    #[must_use]
    pub fn visible(&self) -> &[&'a Task] {
        &self.visible
    }

    /// Returns the number of incomplete tasks across the whole snapshot.
    ///
    /// This is independent of the filter.
    #[must_use]
    pub const fn active_count(&self) -> usize {
        self.active_count
    }

    /// Renders the footer counter, for example `"2 items left"`.
    #[must_use]
    pub fn items_left_label(&self) -> String {
        items_left_label(self.active_count)
    }

    /// Clones the visible tasks into an owned vector.
    #[must_use]
    pub fn to_owned_tasks(&self) -> Vec<Task> {
        self.visible.iter().map(|task| (*task).clone()).collect()
    }
}

/// Projects `tasks` through `filter`.
///
/// `tasks` is expected in store order (newest first); the relative order is
/// kept in the visible subset. The function has no hidden state: equal inputs
/// always produce equal views.
#[must_use]
pub fn project(tasks: &[Task], filter: TaskFilter) -> TaskView<'_> {
    let visible = tasks.iter().filter(|task| filter.matches(task)).collect();
    let active_count = tasks.iter().filter(|task| !task.is_completed()).count();
    TaskView {
        filter,
        visible,
        active_count,
    }
}

/// Renders the footer counter for `active_count` incomplete tasks.
#[must_use]
pub fn items_left_label(active_count: usize) -> String {
    format!("{active_count} items left")
}
